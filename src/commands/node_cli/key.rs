// src/commands/node_cli/key.rs

use std::path::Path;

use crate::commands::params::Flags;
use crate::commands::CommandBuilder;
use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct KeyCommands {
    cmd: CommandBuilder,
}

impl KeyCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    /// Derive the verification key of a signing key.
    pub async fn verification_key(&self, skey: &Path, vkey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--signing-key-file", skey)
            .path("--verification-key-file", vkey_out);
        self.cmd.run(&["verification-key"], flags).await?;
        Ok(())
    }

    pub async fn non_extended_key(&self, extended_vkey: &Path, vkey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--extended-verification-key-file", extended_vkey)
            .path("--verification-key-file", vkey_out);
        self.cmd.run(&["non-extended-key"], flags).await?;
        Ok(())
    }
}
