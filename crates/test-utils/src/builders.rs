#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use cardano_runner::config::{BinarySection, ConfigFile, RawConfigFile};
use cardano_runner::types::{BinaryKind, Era, Network};
use tempfile::NamedTempFile;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn network(mut self, network: Network) -> Self {
        self.config.config.network = network;
        self
    }

    pub fn testnet_magic(mut self, magic: u32) -> Self {
        self.config.config.testnet_magic = Some(magic);
        self
    }

    pub fn era(mut self, era: Era) -> Self {
        self.config.config.era = era;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.config.working_dir = dir.into();
        self
    }

    pub fn show_output(mut self, show: bool) -> Self {
        self.config.config.show_output = show;
        self
    }

    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.node.socket_path = path.into();
        self
    }

    pub fn binary_path(mut self, kind: BinaryKind, path: impl Into<PathBuf>) -> Self {
        self.section(kind).path = Some(path.into());
        self
    }

    pub fn min_version(mut self, kind: BinaryKind, version: &str) -> Self {
        self.section(kind).min_version = Some(version.to_string());
        self
    }

    fn section(&mut self, kind: BinaryKind) -> &mut BinarySection {
        self.config
            .binary
            .entry(kind.executable_name().to_string())
            .or_default()
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `contents` to a temporary `.toml` file that lives as long as the
/// returned handle.
pub fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// Path of a config file that does not exist inside `dir`.
pub fn missing_config(dir: &Path) -> PathBuf {
    dir.join("does-not-exist.toml")
}
