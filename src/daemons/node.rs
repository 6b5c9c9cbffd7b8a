// src/daemons/node.rs

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::{BinarySettings, ConfigFile, NodeSection};
use crate::daemons::{path_arg, Daemon};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator};
use crate::types::BinaryKind;

/// `cardano-node run ...`.
pub struct NodeDaemon(Daemon);

impl NodeDaemon {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
        node: &NodeSection,
    ) -> Self {
        Self(Daemon::new(executable, runner, settings, Self::launch_args_for(node)))
    }

    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::Node);
        let executable = Executable::from_settings(locator, &settings)?;
        Ok(Self::new(executable, runner, &settings, &cfg.node))
    }

    pub fn launch_args_for(node: &NodeSection) -> Vec<String> {
        vec![
            "run".to_string(),
            "--topology".to_string(),
            path_arg(&node.topology_path),
            "--database-path".to_string(),
            path_arg(&node.database_path),
            "--socket-path".to_string(),
            path_arg(&node.socket_path),
            "--host-addr".to_string(),
            node.host_addr.clone(),
            "--port".to_string(),
            node.port.to_string(),
            "--config".to_string(),
            path_arg(&node.config_path),
        ]
    }

    pub fn into_inner(self) -> Daemon {
        self.0
    }
}

impl Deref for NodeDaemon {
    type Target = Daemon;

    fn deref(&self) -> &Daemon {
        &self.0
    }
}

impl DerefMut for NodeDaemon {
    fn deref_mut(&mut self) -> &mut Daemon {
        &mut self.0
    }
}
