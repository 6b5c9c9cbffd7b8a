// src/exec/executable.rs

use std::path::{Path, PathBuf};

use crate::config::BinarySettings;
use crate::errors::Result;
use crate::exec::locator::ExecutableLocator;

/// Immutable descriptor of one wrapped binary.
///
/// The path is absolute and validated once when the descriptor is built;
/// call [`Executable::reprobe`] to check it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    name: String,
    min_version: String,
    path: PathBuf,
    version_args: Vec<String>,
}

impl Executable {
    /// Resolve and validate `name`, preferring an explicitly configured path.
    pub fn resolve(
        locator: &ExecutableLocator,
        name: &str,
        configured: Option<&Path>,
        min_version: &str,
    ) -> Result<Self> {
        let path = locator.resolve(name, configured)?;
        Ok(Self {
            name: name.to_string(),
            min_version: min_version.to_string(),
            path,
            version_args: vec!["--version".to_string()],
        })
    }

    /// Resolve from per-binary settings produced by the config layer.
    pub fn from_settings(locator: &ExecutableLocator, settings: &BinarySettings) -> Result<Self> {
        let exe = Self::resolve(
            locator,
            settings.kind.executable_name(),
            settings.path.as_deref(),
            &settings.min_version,
        )?;
        Ok(exe.with_version_args(settings.kind.version_args()))
    }

    /// Build a descriptor without touching the filesystem.
    ///
    /// Meant for tests that drive a spy runner and never launch anything.
    pub fn unchecked(name: &str, path: impl Into<PathBuf>, min_version: &str) -> Self {
        Self {
            name: name.to_string(),
            min_version: min_version.to_string(),
            path: path.into(),
            version_args: vec!["--version".to_string()],
        }
    }

    pub fn with_version_args(mut self, args: &[&str]) -> Self {
        self.version_args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn min_version(&self) -> &str {
        &self.min_version
    }

    pub fn version_args(&self) -> &[String] {
        &self.version_args
    }

    pub fn reprobe(&self, locator: &ExecutableLocator) -> Result<()> {
        locator.validate(&self.name, &self.path)
    }
}
