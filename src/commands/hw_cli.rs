// src/commands/hw_cli.rs

//! Facade over `cardano-hw-cli` (Ledger/Trezor signing).
//!
//! `cardano-hw-cli` has no era prefix and reports its version through the
//! `version` subcommand rather than `--version`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::commands::params::{exactly_one_of, non_blank, non_empty, Flags};
use crate::commands::CommandBuilder;
use crate::config::{BinarySettings, ConfigFile};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator, VersionedExecutable};
use crate::types::BinaryKind;

/// Parameters for `address show`.
///
/// The stake part is exactly one of a derivation path or a script hash.
#[derive(Debug, Clone, Default)]
pub struct AddressShow {
    pub payment_path: String,
    pub staking_path: Option<String>,
    pub staking_script_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HwCli {
    cmd: CommandBuilder,
}

impl HwCli {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
    ) -> Self {
        let cmd = CommandBuilder::new(executable, runner, &settings.working_dir)
            .with_network(settings.network);
        Self { cmd }
    }

    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::HwCli);
        let executable = Executable::from_settings(locator, &settings)?;
        Ok(Self::new(executable, runner, &settings))
    }

    /// Firmware version of the connected device.
    pub async fn device_version(&self) -> Result<String> {
        self.cmd.run(&["device", "version"], Flags::new()).await
    }

    /// Export the public key at `path` and write the hardware signing file.
    pub async fn address_key_gen(
        &self,
        path: &str,
        vkey_out: &Path,
        hw_signing_out: &Path,
    ) -> Result<()> {
        non_blank("--path", path)?;
        let flags = Flags::new()
            .value("--path", path)
            .path("--verification-key-file", vkey_out)
            .path("--hw-signing-file", hw_signing_out);
        self.cmd.run(&["address", "key-gen"], flags).await?;
        Ok(())
    }

    /// Display the address on the device and return it.
    pub async fn address_show(&self, params: &AddressShow) -> Result<String> {
        non_blank("--payment-path", &params.payment_path)?;
        exactly_one_of(&[
            ("--staking-path", params.staking_path.is_some()),
            ("--staking-script-hash", params.staking_script_hash.is_some()),
        ])?;

        let flags = Flags::new()
            .value("--payment-path", &params.payment_path)
            .opt_value("--staking-path", params.staking_path.as_deref())
            .opt_value("--staking-script-hash", params.staking_script_hash.as_deref());
        self.cmd.run_on_network(&["address", "show"], flags).await
    }

    /// Witness `tx_file` with each `(hw_signing_file, out_file)` pair.
    pub async fn transaction_witness(
        &self,
        tx_file: &Path,
        witnesses: &[(PathBuf, PathBuf)],
    ) -> Result<()> {
        non_empty("--hw-signing-file", witnesses)?;

        let mut flags = Flags::new().path("--tx-file", tx_file);
        for (signing, _) in witnesses {
            flags = flags.path("--hw-signing-file", signing);
        }
        for (_, out) in witnesses {
            flags = flags.path("--out-file", out);
        }
        self.cmd.run_on_network(&["transaction", "witness"], flags).await?;
        Ok(())
    }
}

impl VersionedExecutable for HwCli {
    fn executable(&self) -> &Executable {
        self.cmd.executable()
    }

    fn command_runner(&self) -> &dyn CommandRunner {
        self.cmd.runner()
    }

    fn working_dir(&self) -> &Path {
        self.cmd.working_dir()
    }
}
