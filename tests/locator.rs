// tests/locator.rs

#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cardano_runner::config::BinarySettings;
use cardano_runner::errors::CardanoError;
use cardano_runner::exec::invoker::ProcessInvoker;
use cardano_runner::exec::{Executable, ExecutableLocator, Invocation};
use cardano_runner::fs::mock::MockFileSystem;
use cardano_runner::types::{BinaryKind, Era, NetworkSelector};
use cardano_runner_test_utils::fake_binary::FakeBinDir;
use cardano_runner_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn expect_not_found(err: CardanoError, needle: &str) {
    match err {
        CardanoError::BinaryNotFound { reason, .. } => {
            assert!(reason.contains(needle), "reason {reason:?} should mention {needle:?}");
        }
        other => panic!("expected BinaryNotFound, got {other:?}"),
    }
}

#[test]
fn locate_finds_executable_on_search_path() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.versioned("cardano-cli", "cardano-cli 10.1.1.0")?;

    let locator = ExecutableLocator::system().with_search_path(bin.path());
    let found = locator.locate("cardano-cli")?;

    assert_eq!(found.file_name(), script.file_name());
    Ok(())
}

#[test]
fn locate_missing_binary_is_binary_not_found() -> TestResult {
    let bin = FakeBinDir::new()?;
    let locator = ExecutableLocator::system().with_search_path(bin.path());

    let err = locator.locate("cardano-cli").unwrap_err();
    expect_not_found(err, "search path");
    Ok(())
}

// Walks up to `/` from the current directory, then down to `target`.
fn relative_from_cwd(target: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let mut rel = PathBuf::new();
    for _ in cwd.components().skip(1) {
        rel.push("..");
    }
    rel.push(target.strip_prefix("/")?);
    Ok(rel)
}

#[test]
fn validate_rejects_missing_path() -> TestResult {
    let bin = FakeBinDir::new()?;
    let locator = ExecutableLocator::system();

    let err = locator
        .validate("cardano-node", &bin.path().join("cardano-node"))
        .unwrap_err();
    expect_not_found(err, "does not exist");
    Ok(())
}

#[test]
fn validate_rejects_directory() -> TestResult {
    let bin = FakeBinDir::new()?;
    let dir = bin.subdir("cardano-node")?;

    let err = ExecutableLocator::system()
        .validate("cardano-node", &dir)
        .unwrap_err();
    expect_not_found(err, "not a regular file");
    Ok(())
}

#[test]
fn validate_rejects_file_without_exec_bit() -> TestResult {
    let bin = FakeBinDir::new()?;
    let file = bin.plain_file("ogmios")?;

    let err = ExecutableLocator::system()
        .validate("ogmios", &file)
        .unwrap_err();
    expect_not_found(err, "not executable");
    Ok(())
}

#[test]
fn resolve_prefers_configured_path_over_search() -> TestResult {
    let on_path = FakeBinDir::new()?;
    on_path.versioned("cardano-cli", "cardano-cli 9.0.0")?;
    let pinned = FakeBinDir::new()?;
    let pinned_script = pinned.versioned("cardano-cli", "cardano-cli 10.1.0")?;

    let locator = ExecutableLocator::system().with_search_path(on_path.path());
    let resolved = locator.resolve("cardano-cli", Some(&pinned_script))?;

    assert_eq!(resolved, pinned_script);
    Ok(())
}

#[test]
fn validation_goes_through_injected_filesystem() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_executable("/opt/cardano/bin/cardano-cli", "");
    fs.add_file("/opt/cardano/bin/cardano-hw-cli", "");
    fs.add_dir("/opt/cardano/bin/mithril-client");

    let locator = ExecutableLocator::with_fs(Arc::new(fs));

    locator.validate("cardano-cli", Path::new("/opt/cardano/bin/cardano-cli"))?;
    expect_not_found(
        locator
            .validate("cardano-hw-cli", Path::new("/opt/cardano/bin/cardano-hw-cli"))
            .unwrap_err(),
        "not executable",
    );
    expect_not_found(
        locator
            .validate("mithril-client", Path::new("/opt/cardano/bin/mithril-client"))
            .unwrap_err(),
        "not a regular file",
    );
    Ok(())
}

#[test]
fn executable_from_settings_uses_binary_specific_version_args() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_executable("/bin/cardano-hw-cli", "");
    let locator = ExecutableLocator::with_fs(Arc::new(fs));

    let settings = BinarySettings {
        kind: BinaryKind::HwCli,
        path: Some("/bin/cardano-hw-cli".into()),
        min_version: "1.13.0".to_string(),
        working_dir: ".".into(),
        show_output: false,
        network: NetworkSelector::Mainnet,
        era: Era::Conway,
    };
    let exe = Executable::from_settings(&locator, &settings)?;

    assert_eq!(exe.name(), "cardano-hw-cli");
    assert_eq!(exe.min_version(), "1.13.0");
    assert_eq!(exe.version_args(), ["version".to_string()]);
    exe.reprobe(&locator)?;
    Ok(())
}

#[test]
fn validate_rejects_file_only_others_may_execute() -> TestResult {
    // root passes X_OK whenever any execute bit is set.
    if nix::unistd::geteuid().is_root() {
        return Ok(());
    }
    let bin = FakeBinDir::new()?;
    let script = bin.script("cardano-node", "exit 0")?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o611))?;

    let err = ExecutableLocator::system()
        .validate("cardano-node", &script)
        .unwrap_err();
    expect_not_found(err, "not executable");
    Ok(())
}

#[tokio::test]
async fn relative_configured_path_is_launched_from_any_working_dir() -> TestResult {
    init_tracing();
    let bin = FakeBinDir::new()?;
    let script = bin.versioned("cardano-cli", "cardano-cli 10.1.1.0")?;
    let relative = relative_from_cwd(&script)?;
    assert!(relative.is_relative());

    let exe = Executable::resolve(
        &ExecutableLocator::system(),
        "cardano-cli",
        Some(&relative),
        "8.1.0",
    )?;
    assert!(exe.path().is_absolute());
    assert_eq!(fs::canonicalize(exe.path())?, fs::canonicalize(&script)?);

    // Deep enough that the relative form would point somewhere else.
    let work = tempfile::tempdir()?;
    let mut deep = work.path().to_path_buf();
    for _ in 0..=std::env::current_dir()?.components().count() {
        deep.push("w");
    }
    fs::create_dir_all(&deep)?;

    let invocation = Invocation::new(exe.path(), vec!["--version".to_string()], &deep);
    let out = ProcessInvoker::new().run_command(&invocation).await?;
    assert_eq!(out, "cardano-cli 10.1.1.0");
    Ok(())
}

#[test]
fn located_path_is_absolute() -> TestResult {
    let bin = FakeBinDir::new()?;
    bin.versioned("ogmios", "v6.9.0")?;

    let found = ExecutableLocator::system()
        .with_search_path(bin.path())
        .resolve("ogmios", None)?;
    assert!(found.is_absolute());
    Ok(())
}
