// src/commands/params.rs

//! Pre-flight parameter checks and flag assembly shared by all builders.
//!
//! Validation here happens before any argument vector is handed to a runner,
//! so a rejected call never spawns a process.

use std::path::Path;

use crate::errors::{CardanoError, Result};

/// Require exactly one of the named options to be set.
///
/// `options` pairs a flag name (used in the error message) with whether the
/// caller supplied it.
pub fn exactly_one_of(options: &[(&str, bool)]) -> Result<()> {
    let set: Vec<&str> = options
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect();

    if set.len() == 1 {
        return Ok(());
    }

    let names: Vec<&str> = options.iter().map(|(name, _)| *name).collect();
    let detail = if set.is_empty() {
        "none was given".to_string()
    } else {
        format!("got {}", set.join(", "))
    };
    Err(CardanoError::InvalidParameters(format!(
        "exactly one of {} must be supplied ({detail})",
        names.join(", ")
    )))
}

/// Fail when a required collection is empty.
pub fn non_empty<T>(name: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(CardanoError::InvalidParameters(format!(
            "at least one {name} must be supplied"
        )));
    }
    Ok(())
}

/// Fail when a required string is blank.
pub fn non_blank(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CardanoError::InvalidParameters(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Ordered flag list; insertion order is argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    args: Vec<String>,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bare switch such as `--yes`.
    pub fn switch(mut self, flag: &str) -> Self {
        self.args.push(flag.to_string());
        self
    }

    pub fn value(mut self, flag: &str, value: impl ToString) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.to_string());
        self
    }

    pub fn path(self, flag: &str, path: &Path) -> Self {
        let rendered = path.to_string_lossy().into_owned();
        self.value(flag, rendered)
    }

    pub fn opt_value(self, flag: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.value(flag, v),
            None => self,
        }
    }

    pub fn opt_path(self, flag: &str, path: Option<&Path>) -> Self {
        match path {
            Some(p) => self.path(flag, p),
            None => self,
        }
    }

    /// The same flag once per item, e.g. `--tx-in a --tx-in b`.
    pub fn repeated<T: ToString>(mut self, flag: &str, values: &[T]) -> Self {
        for value in values {
            self.args.push(flag.to_string());
            self.args.push(value.to_string());
        }
        self
    }

    pub fn repeated_paths<P: AsRef<Path>>(mut self, flag: &str, paths: &[P]) -> Self {
        for path in paths {
            self.args.push(flag.to_string());
            self.args.push(path.as_ref().to_string_lossy().into_owned());
        }
        self
    }

    /// A positional argument.
    pub fn positional(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}
