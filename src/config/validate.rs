// src/config/validate.rs

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::model::{BinarySection, ConfigFile, RawConfigFile};
use crate::errors::{CardanoError, Result};
use crate::types::{BinaryKind, Network};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CardanoError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        let binary = parse_binary_sections(&raw)?;
        Ok(ConfigFile::new_unchecked(raw, binary))
    }
}

/// Run every semantic check on a raw config.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_network(cfg)?;
    validate_ports(cfg)?;
    validate_binary_sections(cfg)?;
    Ok(())
}

fn validate_network(cfg: &RawConfigFile) -> Result<()> {
    match (cfg.config.network, cfg.config.testnet_magic) {
        (Network::Mainnet, Some(magic)) => Err(CardanoError::ConfigError(format!(
            "[config].testnet_magic = {magic} cannot be combined with network = \"mainnet\""
        ))),
        (Network::Custom, None) => Err(CardanoError::ConfigError(
            "[config].network = \"custom\" requires [config].testnet_magic".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_ports(cfg: &RawConfigFile) -> Result<()> {
    if cfg.node.port == 0 {
        return Err(CardanoError::ConfigError(
            "[node].port must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.ogmios.port == 0 {
        return Err(CardanoError::ConfigError(
            "[ogmios].port must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_binary_sections(cfg: &RawConfigFile) -> Result<()> {
    for (name, section) in cfg.binary.iter() {
        BinaryKind::from_str(name)
            .map_err(|e| CardanoError::ConfigError(format!("[binary.{name}]: {e}")))?;

        if let Some(min) = &section.min_version {
            if min.trim().is_empty() {
                return Err(CardanoError::ConfigError(format!(
                    "[binary.{name}].min_version must not be empty"
                )));
            }
        }
    }
    Ok(())
}

fn parse_binary_sections(cfg: &RawConfigFile) -> Result<BTreeMap<BinaryKind, BinarySection>> {
    cfg.binary
        .iter()
        .map(|(name, section)| {
            BinaryKind::from_str(name)
                .map(|kind| (kind, section.clone()))
                .map_err(CardanoError::ConfigError)
        })
        .collect()
}
