// src/daemons/ogmios.rs

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::{BinarySettings, ConfigFile, NodeSection, OgmiosSection};
use crate::daemons::{path_arg, Daemon};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator};
use crate::types::BinaryKind;

/// `ogmios` bridge; reads the node's socket and config.
pub struct OgmiosDaemon(Daemon);

impl OgmiosDaemon {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
        ogmios: &OgmiosSection,
        node: &NodeSection,
    ) -> Self {
        let args = Self::launch_args_for(ogmios, node);
        Self(Daemon::new(executable, runner, settings, args))
    }

    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::Ogmios);
        let executable = Executable::from_settings(locator, &settings)?;
        Ok(Self::new(executable, runner, &settings, &cfg.ogmios, &cfg.node))
    }

    pub fn launch_args_for(ogmios: &OgmiosSection, node: &NodeSection) -> Vec<String> {
        vec![
            "--node-socket".to_string(),
            path_arg(&node.socket_path),
            "--node-config".to_string(),
            path_arg(&node.config_path),
            "--host".to_string(),
            ogmios.host.clone(),
            "--port".to_string(),
            ogmios.port.to_string(),
        ]
    }

    pub fn into_inner(self) -> Daemon {
        self.0
    }
}

impl Deref for OgmiosDaemon {
    type Target = Daemon;

    fn deref(&self) -> &Daemon {
        &self.0
    }
}

impl DerefMut for OgmiosDaemon {
    fn deref_mut(&mut self) -> &mut Daemon {
        &mut self.0
    }
}
