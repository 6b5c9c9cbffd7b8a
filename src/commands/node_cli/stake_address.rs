// src/commands/node_cli/stake_address.rs

use std::path::{Path, PathBuf};

use crate::commands::params::{exactly_one_of, Flags};
use crate::commands::CommandBuilder;
use crate::errors::Result;

/// Parameters for `stake-address build`.
///
/// The stake credential comes from exactly one of a verification key or a
/// script file.
#[derive(Debug, Clone, Default)]
pub struct StakeAddressBuild {
    pub stake_verification_key_file: Option<PathBuf>,
    pub stake_script_file: Option<PathBuf>,
    pub out_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct StakeAddressCommands {
    cmd: CommandBuilder,
}

impl StakeAddressCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    pub async fn key_gen(&self, vkey_out: &Path, skey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--verification-key-file", vkey_out)
            .path("--signing-key-file", skey_out);
        self.cmd.run(&["key-gen"], flags).await?;
        Ok(())
    }

    pub async fn build(&self, params: &StakeAddressBuild) -> Result<String> {
        exactly_one_of(&[
            (
                "--stake-verification-key-file",
                params.stake_verification_key_file.is_some(),
            ),
            ("--stake-script-file", params.stake_script_file.is_some()),
        ])?;

        let flags = Flags::new()
            .opt_path(
                "--stake-verification-key-file",
                params.stake_verification_key_file.as_deref(),
            )
            .opt_path("--stake-script-file", params.stake_script_file.as_deref())
            .opt_path("--out-file", params.out_file.as_deref());
        self.cmd.run_on_network(&["build"], flags).await
    }

    /// Registration certificate; Conway-era certificates carry the deposit.
    pub async fn registration_certificate(
        &self,
        stake_vkey: &Path,
        key_reg_deposit: u64,
        out_file: &Path,
    ) -> Result<()> {
        let flags = Flags::new()
            .path("--stake-verification-key-file", stake_vkey)
            .value("--key-reg-deposit-amt", key_reg_deposit)
            .path("--out-file", out_file);
        self.cmd.run(&["registration-certificate"], flags).await?;
        Ok(())
    }
}
