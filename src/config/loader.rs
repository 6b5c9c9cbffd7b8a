// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::env::EnvOverrides;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CardanoError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Read a config file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** apply
/// environment overrides or validate. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    if !fs.exists(path) {
        return Err(CardanoError::FileNotFound(path.to_path_buf()));
    }
    let contents = fs.read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a config file, apply environment overrides and validate.
///
/// The process environment is read here and nowhere else.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    load_with_overrides(&RealFileSystem, path, &EnvOverrides::from_process_env())
}

/// Same as [`load_and_validate`] with an injected filesystem and environment.
pub fn load_with_overrides(
    fs: &dyn FileSystem,
    path: impl AsRef<Path>,
    overrides: &EnvOverrides,
) -> Result<ConfigFile> {
    let mut raw = load_from_path(fs, &path)?;
    overrides.apply(&mut raw)?;
    ConfigFile::try_from(raw)
}

/// Built-in defaults plus environment overrides, for running without a
/// config file.
pub fn defaults_with_overrides(overrides: &EnvOverrides) -> Result<ConfigFile> {
    let mut raw = RawConfigFile::default();
    overrides.apply(&mut raw)?;
    ConfigFile::try_from(raw)
}

/// Default config location: `cardano-runner.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("cardano-runner.toml")
}
