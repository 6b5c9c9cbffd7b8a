// tests/one_shot.rs

#![cfg(unix)]

use std::error::Error;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;

use cardano_runner::errors::CardanoError;
use cardano_runner::exec::{CommandRunner, Invocation, ProcessInvoker};
use cardano_runner_test_utils::fake_binary::FakeBinDir;
use cardano_runner_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn stdout_is_trimmed_on_success() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", r#"printf '  {"slot": 42}  \n\n'"#)?;

    let invocation = Invocation::new(&script, args(&["query", "tip"]), bin.path());
    let out = ProcessInvoker::new().run_command(&invocation).await?;

    assert_eq!(out, r#"{"slot": 42}"#);
    Ok(())
}

#[tokio::test]
async fn failure_carries_argv_and_stderr_diagnostic() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.script(
        "cardano-cli",
        "echo partial output; echo 'Command failed: transaction submit  Error: BadInputsUTxO' >&2; exit 1",
    )?;

    let invocation = Invocation::new(&script, args(&["conway", "transaction", "submit"]), bin.path());
    let err = ProcessInvoker::new().run_command(&invocation).await.unwrap_err();

    match err {
        CardanoError::CommandFailed { program, args, message } => {
            assert_eq!(program, script);
            assert_eq!(args, vec!["conway", "transaction", "submit"]);
            assert!(message.contains("BadInputsUTxO"), "message: {message}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn empty_stderr_reports_unknown_error() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("ogmios", "exit 3")?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path());
    let err = ProcessInvoker::new().run_command(&invocation).await.unwrap_err();

    match err {
        CardanoError::CommandFailed { message, .. } => assert_eq!(message, "unknown error"),
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn undecodable_stderr_reports_unknown_error() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("ogmios", r"printf '\377\376' >&2; exit 1")?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path());
    let err = ProcessInvoker::new().run_command(&invocation).await.unwrap_err();

    match err {
        CardanoError::CommandFailed { message, .. } => assert_eq!(message, "unknown error"),
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn raw_output_keeps_status_and_streams() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", "echo out; echo err >&2; exit 2")?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path());
    let output = ProcessInvoker::new().run_raw(&invocation).await?;

    assert!(!output.success());
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(output.stdout_text(), "out");
    assert_eq!(output.diagnostic(), "err");
    Ok(())
}

#[tokio::test]
async fn launch_failure_is_command_failed() -> TestResult {
    let bin = FakeBinDir::new()?;
    let missing = bin.path().join("cardano-cli");

    let invocation = Invocation::new(&missing, args(&["--version"]), bin.path());
    let err = ProcessInvoker::new().run_command(&invocation).await.unwrap_err();

    match err {
        CardanoError::CommandFailed { message, .. } => {
            assert!(message.contains("failed to launch"), "message: {message}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn env_overrides_reach_the_child() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", r#"echo "$CARDANO_NODE_SOCKET_PATH""#)?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path())
        .with_env("CARDANO_NODE_SOCKET_PATH", "/run/cardano/node.socket");
    let out = ProcessInvoker::new().run_command(&invocation).await?;

    assert_eq!(out, "/run/cardano/node.socket");
    Ok(())
}

#[tokio::test]
async fn child_runs_in_the_requested_working_dir() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", "pwd -P")?;
    let workdir = bin.subdir("node-home")?;

    let invocation = Invocation::new(&script, Vec::new(), &workdir);
    let out = ProcessInvoker::new().run_command(&invocation).await?;

    assert_eq!(std::path::PathBuf::from(out), workdir.canonicalize()?);
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_the_child_and_returns_cancelled() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.script("mithril-client", "exec sleep 30")?;

    let invocation = Invocation::new(&script, args(&["cardano-db", "download", "latest"]), bin.path());
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let invoker = ProcessInvoker::new();

    let call = tokio::spawn(async move { invoker.run_cancellable(&invocation, cancel_rx).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel_tx.send(()).map_err(|_| "receiver dropped")?;

    let result = timeout(Duration::from_secs(5), call).await??;
    match result {
        Err(CardanoError::Cancelled { args, .. }) => {
            assert_eq!(args, vec!["cardano-db", "download", "latest"]);
        }
        other => panic!("expected Cancelled, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn dropped_cancel_sender_does_not_cancel() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", "sleep 0.2; echo done")?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path());
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    drop(cancel_tx);

    let out = with_timeout(ProcessInvoker::new().run_cancellable(&invocation, cancel_rx)).await?;
    assert_eq!(out, "done");
    Ok(())
}

#[tokio::test]
async fn timeout_fails_the_call() -> TestResult {
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", "exec sleep 30")?;

    let invocation = Invocation::new(&script, Vec::new(), bin.path());
    let invoker = ProcessInvoker::with_timeout(Duration::from_millis(200));
    let err = with_timeout(invoker.run_command(&invocation)).await.unwrap_err();

    match err {
        CardanoError::CommandFailed { message, .. } => {
            assert!(message.contains("timed out"), "message: {message}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn concurrent_invocations_keep_their_own_output() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-cli", r#"sleep 0.1; echo "$1""#)?;
    let invoker = ProcessInvoker::new();

    let calls = (0..8).map(|i| {
        let invocation = Invocation::new(&script, vec![format!("call-{i}")], bin.path());
        let invoker = invoker.clone();
        async move { invoker.run(invocation).await }
    });
    let results = with_timeout(spawn_all(calls)).await;

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result?, format!("call-{i}"));
    }
    Ok(())
}

/// Await a batch of futures concurrently on the current task.
async fn spawn_all<F, T>(futs: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futs.map(tokio::spawn).collect();
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await.expect("task panicked"));
    }
    out
}
