// src/commands/node_cli/node.rs

use std::path::Path;

use crate::commands::params::Flags;
use crate::commands::CommandBuilder;
use crate::errors::Result;

/// Stake pool operator keys and certificates.
#[derive(Debug, Clone)]
pub struct NodeCommands {
    cmd: CommandBuilder,
}

impl NodeCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    /// Cold key pair plus the operational certificate counter.
    pub async fn key_gen(&self, cold_vkey: &Path, cold_skey: &Path, counter_file: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--cold-verification-key-file", cold_vkey)
            .path("--cold-signing-key-file", cold_skey)
            .path("--operational-certificate-issue-counter-file", counter_file);
        self.cmd.run(&["key-gen"], flags).await?;
        Ok(())
    }

    pub async fn key_gen_kes(&self, vkey_out: &Path, skey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--verification-key-file", vkey_out)
            .path("--signing-key-file", skey_out);
        self.cmd.run(&["key-gen-KES"], flags).await?;
        Ok(())
    }

    pub async fn key_gen_vrf(&self, vkey_out: &Path, skey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--verification-key-file", vkey_out)
            .path("--signing-key-file", skey_out);
        self.cmd.run(&["key-gen-VRF"], flags).await?;
        Ok(())
    }

    pub async fn issue_op_cert(
        &self,
        kes_vkey: &Path,
        cold_skey: &Path,
        counter_file: &Path,
        kes_period: u64,
        out_file: &Path,
    ) -> Result<()> {
        let flags = Flags::new()
            .path("--kes-verification-key-file", kes_vkey)
            .path("--cold-signing-key-file", cold_skey)
            .path("--operational-certificate-issue-counter", counter_file)
            .value("--kes-period", kes_period)
            .path("--out-file", out_file);
        self.cmd.run(&["issue-op-cert"], flags).await?;
        Ok(())
    }
}
