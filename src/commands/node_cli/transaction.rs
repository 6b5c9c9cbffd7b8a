// src/commands/node_cli/transaction.rs

use std::path::{Path, PathBuf};

use crate::commands::decode::parse_trailing_number;
use crate::commands::params::{non_blank, non_empty, Flags};
use crate::commands::CommandBuilder;
use crate::errors::Result;

/// Parameters for `transaction build-raw` (fee supplied by the caller).
#[derive(Debug, Clone, Default)]
pub struct TransactionBuildRaw {
    pub tx_ins: Vec<String>,
    pub tx_outs: Vec<String>,
    pub fee: u64,
    pub invalid_hereafter: Option<u64>,
    pub certificate_files: Vec<PathBuf>,
    pub out_file: PathBuf,
}

/// Parameters for `transaction build` (fee and change computed by the node).
#[derive(Debug, Clone, Default)]
pub struct TransactionBuild {
    pub tx_ins: Vec<String>,
    pub tx_outs: Vec<String>,
    pub change_address: String,
    pub certificate_files: Vec<PathBuf>,
    pub witness_override: Option<u32>,
    pub out_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TransactionCommands {
    cmd: CommandBuilder,
}

impl TransactionCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    pub async fn build_raw(&self, params: &TransactionBuildRaw) -> Result<()> {
        non_empty("--tx-in", &params.tx_ins)?;

        let flags = Flags::new()
            .repeated("--tx-in", &params.tx_ins)
            .repeated("--tx-out", &params.tx_outs)
            .opt_value("--invalid-hereafter", params.invalid_hereafter)
            .value("--fee", params.fee)
            .repeated_paths("--certificate-file", &params.certificate_files)
            .path("--out-file", &params.out_file);
        self.cmd.run(&["build-raw"], flags).await?;
        Ok(())
    }

    /// Build a balanced transaction; returns the node's fee estimate line.
    pub async fn build(&self, params: &TransactionBuild) -> Result<String> {
        non_empty("--tx-in", &params.tx_ins)?;
        non_blank("--change-address", &params.change_address)?;

        let flags = Flags::new()
            .repeated("--tx-in", &params.tx_ins)
            .repeated("--tx-out", &params.tx_outs)
            .value("--change-address", &params.change_address)
            .repeated_paths("--certificate-file", &params.certificate_files)
            .opt_value("--witness-override", params.witness_override)
            .path("--out-file", &params.out_file);
        self.cmd.run_on_network(&["build"], flags).await
    }

    /// Minimum fee in lovelace for a raw body.
    pub async fn calculate_min_fee(
        &self,
        tx_body_file: &Path,
        witness_count: u32,
        protocol_params_file: &Path,
    ) -> Result<u64> {
        let flags = Flags::new()
            .path("--tx-body-file", tx_body_file)
            .value("--witness-count", witness_count)
            .path("--protocol-params-file", protocol_params_file);
        let out = self.cmd.run(&["calculate-min-fee"], flags).await?;
        parse_trailing_number("transaction calculate-min-fee", &out)
    }

    pub async fn sign<P: AsRef<Path>>(
        &self,
        tx_body_file: &Path,
        signing_key_files: &[P],
        out_file: &Path,
    ) -> Result<()> {
        non_empty("--signing-key-file", signing_key_files)?;

        let flags = Flags::new()
            .path("--tx-body-file", tx_body_file)
            .repeated_paths("--signing-key-file", signing_key_files)
            .path("--out-file", out_file);
        self.cmd.run_on_network(&["sign"], flags).await?;
        Ok(())
    }

    pub async fn submit(&self, tx_file: &Path) -> Result<String> {
        let flags = Flags::new().path("--tx-file", tx_file);
        self.cmd.run_on_network(&["submit"], flags).await
    }

    pub async fn txid(&self, tx_file: &Path) -> Result<String> {
        let flags = Flags::new().path("--tx-file", tx_file);
        self.cmd.run(&["txid"], flags).await
    }
}
