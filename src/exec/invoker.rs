// src/exec/invoker.rs

//! One-shot command execution.
//!
//! Every call spawns exactly one process with its own stdout/stderr pipes, so
//! concurrent invocations never share buffers or locks.

use std::future::pending;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::{CardanoError, Result};
use crate::exec::{BoxFuture, CommandRunner, Invocation};

const UNKNOWN_ERROR: &str = "unknown error";

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct InvocationOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl InvocationOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Stdout decoded as UTF-8 and trimmed.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    /// Stderr text used as the diagnostic payload of a failure.
    ///
    /// Falls back to `"unknown error"` when stderr is empty or not UTF-8.
    pub fn diagnostic(&self) -> String {
        match std::str::from_utf8(&self.stderr) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        }
    }

    /// Map exit status to the trimmed stdout or a `CommandFailed` error.
    pub fn into_result(self, invocation: &Invocation) -> Result<String> {
        if self.success() {
            Ok(self.stdout_text())
        } else {
            Err(invocation.failure(self.diagnostic()))
        }
    }
}

/// Runs executables to completion.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child and fail the call if it runs longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Run to completion and return the raw captured output, whatever the
    /// exit status.
    pub async fn run_raw(&self, invocation: &Invocation) -> Result<InvocationOutput> {
        self.execute(invocation, None).await
    }

    /// Run to completion; trimmed stdout on exit 0, `CommandFailed` otherwise.
    pub async fn run_command(&self, invocation: &Invocation) -> Result<String> {
        let output = self.execute(invocation, None).await?;
        output.into_result(invocation)
    }

    /// Like [`run_command`](Self::run_command), but the child is killed and
    /// the call returns `Cancelled` as soon as `cancel` fires.
    ///
    /// Dropping the sender without sending does not cancel.
    pub async fn run_cancellable(
        &self,
        invocation: &Invocation,
        cancel: oneshot::Receiver<()>,
    ) -> Result<String> {
        let output = self.execute(invocation, Some(cancel)).await?;
        output.into_result(invocation)
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        cancel: Option<oneshot::Receiver<()>>,
    ) -> Result<InvocationOutput> {
        debug!(command = %invocation.display_command(), "spawning one-shot command");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| invocation.failure(format!("failed to launch process: {e}")))?;

        // Dropping this future drops the child, which kills it.
        let wait = child.wait_with_output();
        tokio::pin!(wait);

        let cancelled = async move {
            match cancel {
                Some(rx) => {
                    if rx.await.is_err() {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };

        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => pending::<()>().await,
            }
        };

        let output = tokio::select! {
            res = &mut wait => res
                .map_err(|e| invocation.failure(format!("waiting for process: {e}")))?,

            () = cancelled => {
                info!(command = %invocation.display_command(), "cancellation requested; killing process");
                return Err(CardanoError::Cancelled {
                    program: invocation.program.clone(),
                    args: invocation.args.clone(),
                });
            }

            () = deadline => {
                warn!(
                    command = %invocation.display_command(),
                    timeout_ms = timeout.map(|t| t.as_millis()).unwrap_or_default(),
                    "process timed out; killing"
                );
                return Err(invocation.failure(format!(
                    "timed out after {:?}",
                    timeout.unwrap_or_default()
                )));
            }
        };

        let output = InvocationOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        };

        debug!(
            command = %invocation.display_command(),
            exit_code = output.status.code().unwrap_or(-1),
            success = output.success(),
            "one-shot command exited"
        );

        Ok(output)
    }
}

impl CommandRunner for ProcessInvoker {
    fn run(&self, invocation: Invocation) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move { self.run_command(&invocation).await })
    }
}
