// src/exec/locator.rs

//! Executable lookup and validation.
//!
//! Each call performs a fresh `PATH` search; nothing is cached here. Wrappers
//! keep the resolved path in their own [`Executable`](super::Executable).

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{CardanoError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Resolves binary names to paths and checks that paths are runnable.
#[derive(Debug, Clone)]
pub struct ExecutableLocator {
    fs: Arc<dyn FileSystem>,
    search_path: Option<OsString>,
}

impl Default for ExecutableLocator {
    fn default() -> Self {
        Self::system()
    }
}

impl ExecutableLocator {
    /// Locator over the real filesystem and the process `PATH`.
    pub fn system() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            search_path: None,
        }
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            search_path: None,
        }
    }

    /// Search the given `PATH`-style list instead of the process `PATH`.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Find `binary` on the search path (a `which`-style lookup).
    pub fn locate(&self, binary: &str) -> Result<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir()?;
                which::which_in(binary, Some(paths), cwd)
            }
            None => which::which(binary),
        };

        match found {
            Ok(path) => {
                let path = std::path::absolute(path)?;
                debug!(binary, path = %path.display(), "located executable");
                Ok(path)
            }
            Err(err) => Err(CardanoError::BinaryNotFound {
                binary: binary.to_string(),
                reason: format!("not found on the executable search path ({err})"),
            }),
        }
    }

    /// Check that `path` exists, is a regular file and is executable.
    pub fn validate(&self, binary: &str, path: &Path) -> Result<()> {
        let reason = if !self.fs.exists(path) {
            Some(format!("{} does not exist", path.display()))
        } else if self.fs.is_dir(path) {
            Some(format!("{} is a directory, not a regular file", path.display()))
        } else if !self.fs.is_file(path) {
            Some(format!("{} is not a regular file", path.display()))
        } else if !self.fs.is_executable(path) {
            Some(format!("{} is not executable", path.display()))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CardanoError::BinaryNotFound {
                binary: binary.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Use `configured` when given, otherwise look `binary` up; validate the
    /// result either way.
    ///
    /// The returned path is absolute, so it names the validated file whatever
    /// working directory the binary is later launched in. Relative configured
    /// paths are taken against the current directory of this process.
    pub fn resolve(&self, binary: &str, configured: Option<&Path>) -> Result<PathBuf> {
        let path = match configured {
            Some(path) => std::path::absolute(path)?,
            None => self.locate(binary)?,
        };
        self.validate(binary, &path)?;
        Ok(path)
    }
}
