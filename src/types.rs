// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which Cardano network a command targets.
///
/// Well-known testnets carry their protocol magic; `Custom` requires an
/// explicit `testnet_magic` in the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Preprod,
    Preview,
    Sanchonet,
    Custom,
}

impl Network {
    /// Protocol magic for the well-known networks.
    pub fn default_magic(self) -> Option<u32> {
        match self {
            Network::Mainnet => Some(764_824_073),
            Network::Preprod => Some(1),
            Network::Preview => Some(2),
            Network::Sanchonet => Some(4),
            Network::Custom => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Preprod => "preprod",
            Network::Preview => "preview",
            Network::Sanchonet => "sanchonet",
            Network::Custom => "custom",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "preprod" => Ok(Network::Preprod),
            "preview" => Ok(Network::Preview),
            "sanchonet" => Ok(Network::Sanchonet),
            "custom" => Ok(Network::Custom),
            other => Err(format!(
                "invalid network: {other} (expected mainnet, preprod, preview, sanchonet or custom)"
            )),
        }
    }
}

/// Resolved network selection as passed to the wrapped binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkSelector {
    Mainnet,
    Testnet(u32),
}

impl NetworkSelector {
    /// `--mainnet` or `--testnet-magic <n>`.
    pub fn flags(self) -> Vec<String> {
        match self {
            NetworkSelector::Mainnet => vec!["--mainnet".to_string()],
            NetworkSelector::Testnet(magic) => {
                vec!["--testnet-magic".to_string(), magic.to_string()]
            }
        }
    }
}

/// Ledger era used as the leading `cardano-cli` command group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Babbage,
    #[default]
    Conway,
    Latest,
}

impl Era {
    pub fn as_str(self) -> &'static str {
        match self {
            Era::Babbage => "babbage",
            Era::Conway => "conway",
            Era::Latest => "latest",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical binaries this crate knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryKind {
    NodeCli,
    HwCli,
    Node,
    DbSync,
    Ogmios,
    MithrilClient,
}

impl BinaryKind {
    pub const ALL: [BinaryKind; 6] = [
        BinaryKind::NodeCli,
        BinaryKind::HwCli,
        BinaryKind::Node,
        BinaryKind::DbSync,
        BinaryKind::Ogmios,
        BinaryKind::MithrilClient,
    ];

    /// Executable name looked up on `PATH` and used as the `[binary.<name>]`
    /// config key.
    pub fn executable_name(self) -> &'static str {
        match self {
            BinaryKind::NodeCli => "cardano-cli",
            BinaryKind::HwCli => "cardano-hw-cli",
            BinaryKind::Node => "cardano-node",
            BinaryKind::DbSync => "cardano-db-sync",
            BinaryKind::Ogmios => "ogmios",
            BinaryKind::MithrilClient => "mithril-client",
        }
    }

    pub fn default_min_version(self) -> &'static str {
        match self {
            BinaryKind::NodeCli => "8.1.0",
            BinaryKind::HwCli => "1.13.0",
            BinaryKind::Node => "8.1.0",
            BinaryKind::DbSync => "13.1.0",
            BinaryKind::Ogmios => "6.0.0",
            BinaryKind::MithrilClient => "0.5.0",
        }
    }

    /// Arguments that make the binary print its version and exit.
    pub fn version_args(self) -> &'static [&'static str] {
        match self {
            BinaryKind::HwCli => &["version"],
            _ => &["--version"],
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable_name())
    }
}

impl FromStr for BinaryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BinaryKind::ALL
            .into_iter()
            .find(|kind| kind.executable_name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = BinaryKind::ALL
                    .iter()
                    .map(|k| k.executable_name())
                    .collect();
                format!("unknown binary '{wanted}' (expected one of {})", known.join(", "))
            })
    }
}
