// src/commands/node_cli/query.rs

use std::path::Path;

use crate::commands::decode::{ChainTip, StakeAddressInfo};
use crate::commands::params::{non_blank, Flags};
use crate::commands::CommandBuilder;
use crate::errors::Result;

/// `cardano-cli <era> query ...`. All queries need a running node.
#[derive(Debug, Clone)]
pub struct QueryCommands {
    cmd: CommandBuilder,
}

impl QueryCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    pub async fn tip(&self) -> Result<ChainTip> {
        self.cmd.run_json(&["tip"], Flags::new(), true).await
    }

    /// UTxO set at `address`, keyed by `txid#ix`.
    pub async fn utxo(&self, address: &str) -> Result<serde_json::Value> {
        non_blank("address", address)?;
        let flags = Flags::new().value("--address", address).switch("--output-json");
        self.cmd.run_json(&["utxo"], flags, true).await
    }

    pub async fn protocol_parameters(&self) -> Result<serde_json::Value> {
        self.cmd.run_json(&["protocol-parameters"], Flags::new(), true).await
    }

    /// Write the protocol parameters to `out_file` instead of stdout.
    pub async fn protocol_parameters_to_file(&self, out_file: &Path) -> Result<()> {
        let flags = Flags::new().path("--out-file", out_file);
        self.cmd.run_on_network(&["protocol-parameters"], flags).await?;
        Ok(())
    }

    pub async fn stake_address_info(&self, stake_address: &str) -> Result<Vec<StakeAddressInfo>> {
        non_blank("stake address", stake_address)?;
        let flags = Flags::new().value("--address", stake_address);
        self.cmd.run_json(&["stake-address-info"], flags, true).await
    }

    /// Registered pool ids, one per line.
    pub async fn stake_pools(&self) -> Result<Vec<String>> {
        self.cmd.run_lines(&["stake-pools"], Flags::new(), true).await
    }
}
