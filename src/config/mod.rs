// src/config/mod.rs

//! Configuration loading and validation for cardano-runner.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Apply environment overrides, read once at load time (`env.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate selectors, ports and binary sections (`validate.rs`).
//! - Write a config file without clobbering an existing one (`persist.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod persist;
pub mod validate;

pub use env::EnvOverrides;
pub use loader::{load_and_validate, load_from_path, load_with_overrides};
pub use model::{
    BinarySection, BinarySettings, ConfigFile, ConfigSection, DbSyncSection, MithrilSection,
    NodeSection, OgmiosSection, RawConfigFile,
};
pub use persist::save_config;
pub use validate::validate_config;
