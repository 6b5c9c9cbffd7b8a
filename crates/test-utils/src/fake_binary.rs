use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory of shell-script stand-ins for the Cardano tools.
///
/// Scripts are written, closed and only then made executable, so a test
/// never executes a file that is still open for writing.
pub struct FakeBinDir {
    dir: TempDir,
}

impl FakeBinDir {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable `/bin/sh` script called `name` with `body`.
    pub fn script(&self, name: &str, body: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        make_executable(&path)?;
        Ok(path)
    }

    /// A script that prints `version_line` for `--version` / `version` and
    /// echoes its arguments otherwise.
    pub fn versioned(&self, name: &str, version_line: &str) -> io::Result<PathBuf> {
        let body = format!(
            r#"case "$1" in
  --version|version) echo "{version_line}" ;;
  *) echo "$@" ;;
esac"#
        );
        self.script(name, &body)
    }

    /// A regular file without the executable bit.
    pub fn plain_file(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, "not a program\n")?;
        Ok(path)
    }

    pub fn subdir(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
