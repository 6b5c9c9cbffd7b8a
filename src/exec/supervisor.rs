// src/exec/supervisor.rs

//! Supervised long-lived processes (daemons).
//!
//! A [`SupervisedProcess`] moves through `NotStarted → Running → Terminated`
//! exactly once. Lifecycle methods take `&mut self`, so one owner drives a
//! handle and `start`/`stop`/`is_running` can never race on it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::errors::{CardanoError, Result};
use crate::exec::liveness::{LivenessGuard, LivenessProbe, OsLiveness, SignalProbe};
use crate::exec::{
    BoxFuture, CommandRunner, Executable, Invocation, ProcessInvoker, SupervisedRunner,
    VersionedExecutable,
};

/// Wait between the graceful interrupt and the forceful kill.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    NotStarted,
    Running,
    Terminated,
}

/// Handle on one long-lived child process.
///
/// `R` is the runner used for one-shot queries against the same binary
/// (currently only `version()`).
pub struct SupervisedProcess<R: CommandRunner = ProcessInvoker> {
    executable: Executable,
    runner: R,
    working_dir: PathBuf,
    env: Vec<(String, String)>,
    show_output: bool,
    grace_period: Duration,
    probe: Box<dyn LivenessProbe>,
    args: Vec<String>,
    child: Option<Child>,
    guard: LivenessGuard,
    state: ProcessState,
}

impl SupervisedProcess<ProcessInvoker> {
    pub fn new(executable: Executable) -> Self {
        Self::with_runner(executable, ProcessInvoker::new())
    }
}

impl<R: CommandRunner> SupervisedProcess<R> {
    pub fn with_runner(executable: Executable, runner: R) -> Self {
        Self {
            executable,
            runner,
            working_dir: PathBuf::from("."),
            env: Vec::new(),
            show_output: false,
            grace_period: DEFAULT_GRACE_PERIOD,
            probe: Box::new(SignalProbe),
            args: Vec::new(),
            child: None,
            guard: LivenessGuard::new(),
            state: ProcessState::NotStarted,
        }
    }

    pub fn working_dir_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// When true, `start` inherits the parent's stdout/stderr and waits for
    /// the child to exit.
    pub fn show_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }

    pub fn grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = grace;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn probe(mut self, probe: Box<dyn LivenessProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Last recorded state; call [`is_running_now`](Self::is_running_now) to refresh
    /// it after a possible natural exit.
    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn pid(&self) -> Option<u32> {
        self.guard.pid()
    }

    /// Arguments of the current (or last) run.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn binary(&self) -> String {
        self.executable.name().to_string()
    }

    /// Launch the process with `args`.
    pub async fn start_process(&mut self, args: Vec<String>) -> Result<()> {
        if self.is_running_now() {
            return Err(CardanoError::ProcessAlreadyRunning {
                binary: self.binary(),
                pid: self.guard.pid().unwrap_or_default(),
            });
        }
        if self.state == ProcessState::Terminated {
            return Err(CardanoError::ProcessTerminated {
                binary: self.binary(),
            });
        }

        let invocation = Invocation::new(self.executable.path(), args, &self.working_dir)
            .with_envs(&self.env);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if self.show_output {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| invocation.failure(format!("failed to launch process: {e}")))?;
        let pid = child
            .id()
            .ok_or_else(|| invocation.failure("process exited before its pid could be read"))?;

        self.guard.register(pid);
        self.state = ProcessState::Running;
        self.args = invocation.args.clone();

        info!(
            binary = %self.executable.name(),
            pid,
            command = %invocation.display_command(),
            show_output = self.show_output,
            "supervised process started"
        );

        if self.show_output {
            let waited = child.wait().await;
            self.guard.mark_terminated();
            self.state = ProcessState::Terminated;

            let status =
                waited.map_err(|e| invocation.failure(format!("waiting for process: {e}")))?;
            info!(
                binary = %self.executable.name(),
                pid,
                exit_code = status.code().unwrap_or(-1),
                "foreground process exited"
            );
            if !status.success() {
                return Err(invocation.failure(format!("process exited with {status}")));
            }
            return Ok(());
        }

        if let Some(stdout) = child.stdout.take() {
            drain_lines(self.binary(), "stdout", stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            drain_lines(self.binary(), "stderr", stderr);
        }
        self.child = Some(child);

        Ok(())
    }

    /// Interrupt, wait up to the grace period, then kill.
    ///
    /// A no-op when the process is not running.
    pub async fn stop_process(&mut self) -> Result<()> {
        if !self.is_running_now() {
            debug!(binary = %self.executable.name(), "stop requested but process is not running");
            return Ok(());
        }
        let (Some(mut child), Some(pid)) = (self.child.take(), self.guard.pid()) else {
            return Ok(());
        };

        info!(binary = %self.executable.name(), pid, "sending interrupt to supervised process");

        let exited = match send_interrupt(pid) {
            Ok(()) => match timeout(self.grace_period, child.wait()).await {
                Ok(Ok(status)) => {
                    info!(
                        binary = %self.executable.name(),
                        pid,
                        exit_code = status.code().unwrap_or(-1),
                        "supervised process stopped"
                    );
                    true
                }
                Ok(Err(e)) => {
                    warn!(binary = %self.executable.name(), pid, error = %e, "failed waiting for process after interrupt");
                    false
                }
                Err(_) => {
                    warn!(
                        binary = %self.executable.name(),
                        pid,
                        grace_ms = self.grace_period.as_millis(),
                        "process still alive after grace period"
                    );
                    false
                }
            },
            Err(e) => {
                warn!(binary = %self.executable.name(), pid, error = %e, "could not deliver interrupt");
                false
            }
        };

        if !exited {
            force_kill(self.binary(), pid, child);
        }

        // Flip before returning so no later `is_running` sees a stale state,
        // even while a forced kill is still being reaped.
        self.guard.mark_terminated();
        self.state = ProcessState::Terminated;
        Ok(())
    }

    /// Three-tier liveness check; records a natural exit.
    pub fn is_running_now(&mut self) -> bool {
        if self.guard.is_terminated() {
            return false;
        }
        let Some(child) = self.child.as_mut() else {
            return false;
        };

        let os = match child.try_wait() {
            Ok(None) => OsLiveness::Running,
            Ok(Some(status)) => {
                info!(
                    binary = %self.executable.name(),
                    exit_code = status.code().unwrap_or(-1),
                    "supervised process exited on its own"
                );
                OsLiveness::Exited
            }
            Err(e) => {
                debug!(binary = %self.executable.name(), error = %e, "could not query child status");
                OsLiveness::Unknown
            }
        };

        let alive = self.guard.resolve(os, self.probe.as_ref());
        if !alive {
            if os == OsLiveness::Exited {
                self.child = None;
            }
            self.guard.mark_terminated();
            self.state = ProcessState::Terminated;
        }
        alive
    }
}

impl<R: CommandRunner> VersionedExecutable for SupervisedProcess<R> {
    fn executable(&self) -> &Executable {
        &self.executable
    }

    fn command_runner(&self) -> &dyn CommandRunner {
        &self.runner
    }

    fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl<R: CommandRunner> SupervisedRunner for SupervisedProcess<R> {
    fn start(&mut self, args: Vec<String>) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.start_process(args))
    }

    fn stop(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.stop_process())
    }

    fn is_running(&mut self) -> bool {
        self.is_running_now()
    }
}

/// Consume a child pipe so it never fills; lines are logged at debug.
fn drain_lines<T>(binary: String, stream: &'static str, pipe: T)
where
    T: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(binary = %binary, stream, "{}", line);
        }
        debug!(binary = %binary, stream, "output stream closed");
    });
}

#[cfg(unix)]
fn send_interrupt(pid: u32) -> std::io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let raw = i32::try_from(pid)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "pid out of range"))?;
    kill(Pid::from_raw(raw), Signal::SIGINT).map_err(std::io::Error::from)
}

#[cfg(not(unix))]
fn send_interrupt(_pid: u32) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "graceful interrupt is not supported on this platform",
    ))
}

/// Kill without waiting; the child is reaped in the background.
fn force_kill(binary: String, pid: u32, mut child: Child) {
    if let Err(e) = child.start_kill() {
        warn!(binary = %binary, pid, error = %e, "failed to send kill signal");
    }
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!(
                binary = %binary,
                pid,
                exit_code = status.code().unwrap_or(-1),
                "killed process reaped"
            ),
            Err(e) => warn!(binary = %binary, pid, error = %e, "failed to reap killed process"),
        }
    });
}
