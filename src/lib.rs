// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod daemons;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use tracing::{debug, error, info, warn};

use crate::cli::{CliArgs, Command};
use crate::commands::{HwCli, MithrilClient, NodeCli};
use crate::config::loader::{default_config_path, defaults_with_overrides, load_with_overrides};
use crate::config::{save_config, ConfigFile, EnvOverrides};
use crate::daemons::{DbSyncDaemon, NodeDaemon, OgmiosDaemon};
use crate::exec::{CommandRunner, ExecutableLocator, ProcessInvoker, VersionedExecutable};
use crate::fs::RealFileSystem;
use crate::types::BinaryKind;

/// How often `node` polls the supervised process while waiting for Ctrl-C.
const NODE_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// High-level entry point used by `main.rs`.
///
/// Loads the configuration once (file plus environment), then dispatches to
/// the requested subcommand.
pub async fn run(args: CliArgs) -> Result<()> {
    let overrides = EnvOverrides::from_process_env();
    let config_path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    if let Command::Init { force } = args.command {
        return init_config(&config_path, &overrides, force, args.dry_run);
    }

    let cfg = load_config(&config_path, args.config.is_some(), &overrides)?;

    if args.dry_run {
        print_dry_run(&cfg, &args.command)?;
        return Ok(());
    }

    let locator = ExecutableLocator::system();
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessInvoker::new());

    match args.command {
        Command::Init { .. } => Ok(()),
        Command::Check => check_binaries(&cfg, &locator, runner).await,
        Command::Tip => {
            let cli = NodeCli::from_config(&cfg, &locator, runner)?;
            cli.check_version().await?;
            let tip = cli.query().tip().await?;
            println!("{}", serde_json::to_string_pretty(&tip)?);
            Ok(())
        }
        Command::Node => run_node(&cfg, &locator, runner).await,
        Command::Version { binary } => {
            let kind: BinaryKind = binary.parse().map_err(|e: String| anyhow!(e))?;
            let target = versioned(kind, &cfg, &locator, runner)?;
            println!("{}", target.version().await?);
            Ok(())
        }
    }
}

/// An explicitly named config file must exist; the default one may be
/// absent, in which case built-in defaults apply.
fn load_config(path: &Path, explicit: bool, overrides: &EnvOverrides) -> Result<ConfigFile> {
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file found, using defaults");
        return Ok(defaults_with_overrides(overrides)?);
    }
    let cfg = load_with_overrides(&RealFileSystem, path, overrides)?;
    info!(path = %path.display(), network = %cfg.config.network, "configuration loaded");
    Ok(cfg)
}

fn init_config(path: &Path, overrides: &EnvOverrides, force: bool, dry_run: bool) -> Result<()> {
    let cfg = defaults_with_overrides(overrides)?;
    let raw = cfg.to_raw();
    if dry_run {
        print!("{}", toml::to_string_pretty(&raw)?);
        return Ok(());
    }
    save_config(&RealFileSystem, path, &raw, force)?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Any wrapped binary, viewed only through its version capability.
fn versioned(
    kind: BinaryKind,
    cfg: &ConfigFile,
    locator: &ExecutableLocator,
    runner: Arc<dyn CommandRunner>,
) -> Result<Box<dyn VersionedExecutable>> {
    let target: Box<dyn VersionedExecutable> = match kind {
        BinaryKind::NodeCli => Box::new(NodeCli::from_config(cfg, locator, runner)?),
        BinaryKind::HwCli => Box::new(HwCli::from_config(cfg, locator, runner)?),
        BinaryKind::MithrilClient => Box::new(MithrilClient::from_config(cfg, locator, runner)?),
        BinaryKind::Node => Box::new(NodeDaemon::from_config(cfg, locator, runner)?.into_inner()),
        BinaryKind::DbSync => {
            Box::new(DbSyncDaemon::from_config(cfg, locator, runner)?.into_inner())
        }
        BinaryKind::Ogmios => {
            Box::new(OgmiosDaemon::from_config(cfg, locator, runner)?.into_inner())
        }
    };
    Ok(target)
}

/// Resolve and version-gate every known binary; report all failures.
async fn check_binaries(
    cfg: &ConfigFile,
    locator: &ExecutableLocator,
    runner: Arc<dyn CommandRunner>,
) -> Result<()> {
    let mut failed = Vec::new();

    for kind in BinaryKind::ALL {
        let outcome = match versioned(kind, cfg, locator, runner.clone()) {
            Ok(target) => target.check_version().await.map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(version) => println!("{:<16} {:<12} ok", kind.executable_name(), version),
            Err(e) => {
                println!("{:<16} {:<12} {e}", kind.executable_name(), "-");
                failed.push(kind.executable_name());
            }
        }
    }

    if !failed.is_empty() {
        bail!("{} binaries failed the check: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

/// Supervise `cardano-node` until Ctrl-C or until it exits on its own.
async fn run_node(
    cfg: &ConfigFile,
    locator: &ExecutableLocator,
    runner: Arc<dyn CommandRunner>,
) -> Result<()> {
    let mut node = NodeDaemon::from_config(cfg, locator, runner)?;
    let version = node.check_version().await?;
    info!(version = %version, "starting cardano-node");

    // Foreground mode blocks in start until the node exits.
    node.start().await?;
    if !node.is_running() {
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                if let Err(e) = res {
                    error!(error = %e, "failed to listen for Ctrl+C");
                }
                info!("shutdown requested, stopping cardano-node");
                break;
            }
            _ = tokio::time::sleep(NODE_POLL_INTERVAL) => {
                if !node.is_running() {
                    warn!("cardano-node exited unexpectedly");
                    bail!("cardano-node exited unexpectedly");
                }
            }
        }
    }

    node.stop().await?;
    Ok(())
}

/// Print the effective configuration and what the subcommand would run.
fn print_dry_run(cfg: &ConfigFile, command: &Command) -> Result<()> {
    println!("cardano-runner dry-run");
    println!();
    print!("{}", toml::to_string_pretty(&cfg.to_raw())?);
    println!();

    match command {
        Command::Node => {
            let settings = cfg.binary_settings(BinaryKind::Node);
            println!(
                "would run: {} {}",
                settings
                    .path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| BinaryKind::Node.executable_name().to_string()),
                NodeDaemon::launch_args_for(&cfg.node).join(" ")
            );
        }
        Command::Tip => {
            let mut args = vec![cfg.config.era.as_str().to_string(), "query".into(), "tip".into()];
            args.extend(cfg.network_selector().flags());
            println!("would run: {} {}", BinaryKind::NodeCli, args.join(" "));
        }
        other => println!("would run: {other:?}"),
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
