// src/config/env.rs

//! Environment variable overrides.
//!
//! The variables are read exactly once, when the configuration is loaded.
//! Nothing below the config layer looks at the process environment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::config::model::RawConfigFile;
use crate::errors::{CardanoError, Result};
use crate::types::Network;

pub const NETWORK: &str = "CARDANO_NETWORK";
pub const TESTNET_MAGIC: &str = "CARDANO_TESTNET_MAGIC";
pub const NODE_SOCKET_PATH: &str = "CARDANO_NODE_SOCKET_PATH";
pub const NODE_CONFIG: &str = "CARDANO_NODE_CONFIG";
pub const NODE_TOPOLOGY: &str = "CARDANO_NODE_TOPOLOGY";
pub const NODE_DB: &str = "CARDANO_NODE_DB";
pub const NODE_HOST: &str = "CARDANO_NODE_HOST";
pub const NODE_PORT: &str = "CARDANO_NODE_PORT";
pub const AGGREGATOR_ENDPOINT: &str = "AGGREGATOR_ENDPOINT";
pub const GENESIS_VERIFICATION_KEY: &str = "GENESIS_VERIFICATION_KEY";

const ALL: [&str; 10] = [
    NETWORK,
    TESTNET_MAGIC,
    NODE_SOCKET_PATH,
    NODE_CONFIG,
    NODE_TOPOLOGY,
    NODE_DB,
    NODE_HOST,
    NODE_PORT,
    AGGREGATOR_ENDPOINT,
    GENESIS_VERIFICATION_KEY,
];

/// Snapshot of the recognised environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: HashMap<String, String>,
}

impl EnvOverrides {
    /// Read the recognised variables from the process environment.
    pub fn from_process_env() -> Self {
        Self::from_vars(
            ALL.iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value))),
        )
    }

    /// Build from explicit pairs; unrecognised keys and empty values are
    /// dropped.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| ALL.contains(&k.as_str()) && !v.trim().is_empty())
            .collect();
        Self { vars }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.trim())
    }

    /// Apply the overrides on top of values read from the file.
    pub fn apply(&self, cfg: &mut RawConfigFile) -> Result<()> {
        if let Some(value) = self.get(NETWORK) {
            cfg.config.network = Network::from_str(value)
                .map_err(|e| CardanoError::ConfigError(format!("{NETWORK}: {e}")))?;
        }
        if let Some(value) = self.get(TESTNET_MAGIC) {
            let magic = value.parse::<u32>().map_err(|e| {
                CardanoError::ConfigError(format!("{TESTNET_MAGIC}: invalid magic '{value}': {e}"))
            })?;
            cfg.config.testnet_magic = Some(magic);
        }
        if let Some(value) = self.get(NODE_SOCKET_PATH) {
            cfg.node.socket_path = PathBuf::from(value);
        }
        if let Some(value) = self.get(NODE_CONFIG) {
            cfg.node.config_path = PathBuf::from(value);
        }
        if let Some(value) = self.get(NODE_TOPOLOGY) {
            cfg.node.topology_path = PathBuf::from(value);
        }
        if let Some(value) = self.get(NODE_DB) {
            cfg.node.database_path = PathBuf::from(value);
        }
        if let Some(value) = self.get(NODE_HOST) {
            cfg.node.host_addr = value.to_string();
        }
        if let Some(value) = self.get(NODE_PORT) {
            cfg.node.port = value.parse::<u16>().map_err(|e| {
                CardanoError::ConfigError(format!("{NODE_PORT}: invalid port '{value}': {e}"))
            })?;
        }
        if let Some(value) = self.get(AGGREGATOR_ENDPOINT) {
            cfg.mithril.aggregator_endpoint = Some(value.to_string());
        }
        if let Some(value) = self.get(GENESIS_VERIFICATION_KEY) {
            cfg.mithril.genesis_verification_key = Some(value.to_string());
        }

        if !self.is_empty() {
            let mut keys: Vec<&str> = self.vars.keys().map(String::as_str).collect();
            keys.sort_unstable();
            debug!(?keys, "applied environment overrides to configuration");
        }
        Ok(())
    }
}
