// src/config/persist.rs

use std::path::Path;

use tracing::info;

use crate::config::model::RawConfigFile;
use crate::errors::{CardanoError, Result};
use crate::fs::FileSystem;

/// Write `cfg` as TOML to `path`.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn save_config(
    fs: &dyn FileSystem,
    path: impl AsRef<Path>,
    cfg: &RawConfigFile,
    overwrite: bool,
) -> Result<()> {
    let path = path.as_ref();
    if fs.exists(path) && !overwrite {
        return Err(CardanoError::FileAlreadyExists(path.to_path_buf()));
    }

    let contents = toml::to_string_pretty(cfg)?;
    fs.write(path, contents.as_bytes())?;

    info!(path = %path.display(), overwrite, "configuration written");
    Ok(())
}
