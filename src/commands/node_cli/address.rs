// src/commands/node_cli/address.rs

use std::path::Path;

use crate::commands::params::{non_blank, Flags};
use crate::commands::CommandBuilder;
use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct AddressCommands {
    cmd: CommandBuilder,
}

impl AddressCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    /// Generate a payment key pair.
    pub async fn key_gen(&self, vkey_out: &Path, skey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--verification-key-file", vkey_out)
            .path("--signing-key-file", skey_out);
        self.cmd.run(&["key-gen"], flags).await?;
        Ok(())
    }

    /// Build a payment address, optionally with a stake part.
    ///
    /// Without `out_file` the address is returned from stdout.
    pub async fn build(
        &self,
        payment_vkey: &Path,
        stake_vkey: Option<&Path>,
        out_file: Option<&Path>,
    ) -> Result<String> {
        let flags = Flags::new()
            .path("--payment-verification-key-file", payment_vkey)
            .opt_path("--stake-verification-key-file", stake_vkey)
            .opt_path("--out-file", out_file);
        self.cmd.run_on_network(&["build"], flags).await
    }

    /// Decoded address details as JSON.
    pub async fn info(&self, address: &str) -> Result<serde_json::Value> {
        non_blank("address", address)?;
        let flags = Flags::new().value("--address", address);
        self.cmd.run_json(&["info"], flags, false).await
    }
}
