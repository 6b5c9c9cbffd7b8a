// src/commands/mithril.rs

//! Facade over `mithril-client` for certified chain snapshots.

use std::path::Path;
use std::sync::Arc;

use crate::commands::decode::Snapshot;
use crate::commands::params::{non_blank, Flags};
use crate::commands::CommandBuilder;
use crate::config::env::{AGGREGATOR_ENDPOINT, GENESIS_VERIFICATION_KEY};
use crate::config::{BinarySettings, ConfigFile};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator, VersionedExecutable};
use crate::types::BinaryKind;

#[derive(Debug, Clone)]
pub struct MithrilClient {
    cmd: CommandBuilder,
}

impl MithrilClient {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
    ) -> Self {
        let cmd = CommandBuilder::new(executable, runner, &settings.working_dir)
            .scoped(&["cardano-db"]);
        Self { cmd }
    }

    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::MithrilClient);
        let executable = Executable::from_settings(locator, &settings)?;
        let mut client = Self::new(executable, runner, &settings);
        if let Some(endpoint) = &cfg.mithril.aggregator_endpoint {
            client = client.with_aggregator_endpoint(endpoint);
        }
        if let Some(key) = &cfg.mithril.genesis_verification_key {
            client = client.with_genesis_verification_key(key);
        }
        Ok(client)
    }

    pub fn with_aggregator_endpoint(mut self, endpoint: &str) -> Self {
        self.cmd = self.cmd.with_env(AGGREGATOR_ENDPOINT, endpoint);
        self
    }

    pub fn with_genesis_verification_key(mut self, key: &str) -> Self {
        self.cmd = self.cmd.with_env(GENESIS_VERIFICATION_KEY, key);
        self
    }

    pub async fn snapshot_list(&self) -> Result<Vec<Snapshot>> {
        let flags = Flags::new().switch("--json");
        self.cmd.run_json(&["snapshot", "list"], flags, false).await
    }

    pub async fn snapshot_show(&self, digest: &str) -> Result<Snapshot> {
        non_blank("digest", digest)?;
        let flags = Flags::new().positional(digest).switch("--json");
        self.cmd.run_json(&["snapshot", "show"], flags, false).await
    }

    /// Download and verify the snapshot `digest` (or `latest`) into `download_dir`.
    pub async fn download(&self, digest: &str, download_dir: &Path) -> Result<String> {
        non_blank("digest", digest)?;
        let flags = Flags::new()
            .positional(digest)
            .path("--download-dir", download_dir);
        self.cmd.run(&["download"], flags).await
    }
}

impl VersionedExecutable for MithrilClient {
    fn executable(&self) -> &Executable {
        self.cmd.executable()
    }

    fn command_runner(&self) -> &dyn CommandRunner {
        self.cmd.runner()
    }

    fn working_dir(&self) -> &Path {
        self.cmd.working_dir()
    }
}
