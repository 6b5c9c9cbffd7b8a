// src/daemons/db_sync.rs

use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

use crate::config::{BinarySettings, ConfigFile, DbSyncSection};
use crate::daemons::{path_arg, Daemon};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator};
use crate::types::BinaryKind;

/// `cardano-db-sync`, following the node through its socket.
pub struct DbSyncDaemon(Daemon);

impl DbSyncDaemon {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
        db_sync: &DbSyncSection,
        socket_path: &Path,
    ) -> Self {
        let args = Self::launch_args_for(db_sync, socket_path);
        Self(Daemon::new(executable, runner, settings, args))
    }

    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::DbSync);
        let executable = Executable::from_settings(locator, &settings)?;
        Ok(Self::new(
            executable,
            runner,
            &settings,
            &cfg.db_sync,
            &cfg.node.socket_path,
        ))
    }

    pub fn launch_args_for(db_sync: &DbSyncSection, socket_path: &Path) -> Vec<String> {
        vec![
            "--config".to_string(),
            path_arg(&db_sync.config_path),
            "--socket-path".to_string(),
            path_arg(socket_path),
            "--state-dir".to_string(),
            path_arg(&db_sync.state_dir),
            "--schema-dir".to_string(),
            path_arg(&db_sync.schema_dir),
        ]
    }

    pub fn into_inner(self) -> Daemon {
        self.0
    }
}

impl Deref for DbSyncDaemon {
    type Target = Daemon;

    fn deref(&self) -> &Daemon {
        &self.0
    }
}

impl DerefMut for DbSyncDaemon {
    fn deref_mut(&mut self) -> &mut Daemon {
        &mut self.0
    }
}
