// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{BinaryKind, Era, Network, NetworkSelector};

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [config]
/// network = "preprod"
/// era = "conway"
///
/// [node]
/// socket_path = "db/node.socket"
///
/// [binary.cardano-cli]
/// path = "/opt/cardano/bin/cardano-cli"
/// min_version = "8.1.0"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub node: NodeSection,

    #[serde(default)]
    pub db_sync: DbSyncSection,

    #[serde(default)]
    pub ogmios: OgmiosSection,

    #[serde(default)]
    pub mithril: MithrilSection,

    /// Per-binary overrides keyed by executable name (`cardano-cli`, ...).
    #[serde(default)]
    pub binary: BTreeMap<String, BinarySection>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders can rely on the checks having passed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub node: NodeSection,
    pub db_sync: DbSyncSection,
    pub ogmios: OgmiosSection,
    pub mithril: MithrilSection,
    pub binary: BTreeMap<BinaryKind, BinarySection>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        raw: RawConfigFile,
        binary: BTreeMap<BinaryKind, BinarySection>,
    ) -> Self {
        Self {
            config: raw.config,
            node: raw.node,
            db_sync: raw.db_sync,
            ogmios: raw.ogmios,
            mithril: raw.mithril,
            binary,
        }
    }

    /// Resolved network flags for the wrapped binaries.
    pub fn network_selector(&self) -> NetworkSelector {
        match (self.config.network, self.config.testnet_magic) {
            (Network::Mainnet, _) => NetworkSelector::Mainnet,
            (_, Some(magic)) => NetworkSelector::Testnet(magic),
            (network, None) => NetworkSelector::Testnet(network.default_magic().unwrap_or_default()),
        }
    }

    /// Settings for one binary with the global defaults filled in.
    pub fn binary_settings(&self, kind: BinaryKind) -> BinarySettings {
        let section = self.binary.get(&kind);
        BinarySettings {
            kind,
            path: section.and_then(|s| s.path.clone()),
            min_version: section
                .and_then(|s| s.min_version.clone())
                .unwrap_or_else(|| kind.default_min_version().to_string()),
            working_dir: section
                .and_then(|s| s.working_dir.clone())
                .unwrap_or_else(|| self.config.working_dir.clone()),
            show_output: section
                .and_then(|s| s.show_output)
                .unwrap_or(self.config.show_output),
            network: self.network_selector(),
            era: self.config.era,
        }
    }

    /// Back to the serialisable form, e.g. for `init` or `--dry-run`.
    pub fn to_raw(&self) -> RawConfigFile {
        RawConfigFile {
            config: self.config.clone(),
            node: self.node.clone(),
            db_sync: self.db_sync.clone(),
            ogmios: self.ogmios.clone(),
            mithril: self.mithril.clone(),
            binary: self
                .binary
                .iter()
                .map(|(kind, section)| (kind.executable_name().to_string(), section.clone()))
                .collect(),
        }
    }
}

/// `[config]` section: global selectors shared by every binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigSection {
    #[serde(default)]
    pub network: Network,

    /// Overrides the well-known magic; required for `network = "custom"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet_magic: Option<u32>,

    #[serde(default)]
    pub era: Era,

    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Whether daemons inherit the console (and run in the foreground).
    #[serde(default)]
    pub show_output: bool,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            network: Network::default(),
            testnet_magic: None,
            era: Era::default(),
            working_dir: default_working_dir(),
            show_output: false,
        }
    }
}

/// `[node]` section: paths and bind address for `cardano-node`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeSection {
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    #[serde(default = "default_node_config")]
    pub config_path: PathBuf,
    #[serde(default = "default_topology")]
    pub topology_path: PathBuf,
    #[serde(default = "default_database")]
    pub database_path: PathBuf,
    #[serde(default = "default_host_addr")]
    pub host_addr: String,
    #[serde(default = "default_node_port")]
    pub port: u16,
}

fn default_socket_path() -> PathBuf {
    PathBuf::from("db/node.socket")
}

fn default_node_config() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_topology() -> PathBuf {
    PathBuf::from("topology.json")
}

fn default_database() -> PathBuf {
    PathBuf::from("db")
}

fn default_host_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_node_port() -> u16 {
    3001
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            config_path: default_node_config(),
            topology_path: default_topology(),
            database_path: default_database(),
            host_addr: default_host_addr(),
            port: default_node_port(),
        }
    }
}

/// `[db_sync]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DbSyncSection {
    #[serde(default = "default_db_sync_config")]
    pub config_path: PathBuf,
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,
}

fn default_db_sync_config() -> PathBuf {
    PathBuf::from("db-sync-config.json")
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("ledger-state")
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schema")
}

impl Default for DbSyncSection {
    fn default() -> Self {
        Self {
            config_path: default_db_sync_config(),
            state_dir: default_state_dir(),
            schema_dir: default_schema_dir(),
        }
    }
}

/// `[ogmios]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OgmiosSection {
    #[serde(default = "default_ogmios_host")]
    pub host: String,
    #[serde(default = "default_ogmios_port")]
    pub port: u16,
}

fn default_ogmios_host() -> String {
    "127.0.0.1".to_string()
}

fn default_ogmios_port() -> u16 {
    1337
}

impl Default for OgmiosSection {
    fn default() -> Self {
        Self {
            host: default_ogmios_host(),
            port: default_ogmios_port(),
        }
    }
}

/// `[mithril]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MithrilSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_verification_key: Option<String>,
}

/// `[binary.<name>]` section. Every field falls back to a global default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BinarySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_output: Option<bool>,
}

/// Everything the process core needs to know about one binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySettings {
    pub kind: BinaryKind,
    /// Explicit path; `None` means "look it up on PATH".
    pub path: Option<PathBuf>,
    pub min_version: String,
    pub working_dir: PathBuf,
    pub show_output: bool,
    pub network: NetworkSelector,
    pub era: Era,
}
