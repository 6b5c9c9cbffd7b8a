// src/commands/decode.rs

//! Typed views of wrapped-binary output.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{CardanoError, Result};

/// `cardano-cli query tip` output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTip {
    pub block: u64,
    pub epoch: u64,
    pub era: String,
    pub hash: String,
    pub slot: u64,
    #[serde(default)]
    pub slot_in_epoch: Option<u64>,
    #[serde(default)]
    pub slots_to_epoch_end: Option<u64>,
    /// Percentage as printed by the node, e.g. `"100.00"`.
    #[serde(default)]
    pub sync_progress: Option<String>,
}

impl ChainTip {
    pub fn sync_percent(&self) -> Option<f64> {
        self.sync_progress.as_deref().and_then(|p| p.parse().ok())
    }
}

/// One entry of `cardano-cli query stake-address-info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeAddressInfo {
    pub address: String,
    /// Pool id; newer nodes call the field `stakeDelegation`.
    #[serde(default, alias = "stakeDelegation")]
    pub delegation: Option<String>,
    #[serde(default)]
    pub reward_account_balance: u64,
    #[serde(default)]
    pub delegation_deposit: Option<u64>,
    #[serde(default)]
    pub vote_delegation: Option<String>,
}

/// Beacon of a Mithril snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Beacon {
    #[serde(default)]
    pub network: Option<String>,
    pub epoch: u64,
    pub immutable_file_number: u64,
}

/// A Mithril cardano-db snapshot as listed by `mithril-client`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub digest: String,
    #[serde(default)]
    pub network: Option<String>,
    pub beacon: Beacon,
    #[serde(default)]
    pub certificate_hash: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub cardano_node_version: Option<String>,
}

/// Decode JSON output, naming `context` in the error.
pub fn parse_json<T: DeserializeOwned>(context: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| CardanoError::Decode {
        context: context.to_string(),
        source,
    })
}

/// Non-empty trimmed lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The last whitespace-separated token that parses as an integer.
///
/// Handles both `"171353 Lovelace"` and `"Estimated transaction fee: Lovelace 171353"`.
pub fn parse_trailing_number(context: &str, text: &str) -> Result<u64> {
    text.split_whitespace()
        .rev()
        .find_map(|token| token.parse::<u64>().ok())
        .ok_or_else(|| CardanoError::UnexpectedOutput {
            context: context.to_string(),
            output: text.to_string(),
        })
}
