// src/commands/node_cli/mod.rs

//! Facade over `cardano-cli`.
//!
//! Every command starts with the configured era (`conway query tip ...`).
//! Commands that talk to a node get the network selector appended and the
//! node socket passed through `CARDANO_NODE_SOCKET_PATH`.

use std::path::Path;
use std::sync::Arc;

use crate::commands::CommandBuilder;
use crate::config::env::NODE_SOCKET_PATH;
use crate::config::{BinarySettings, ConfigFile};
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, ExecutableLocator, VersionedExecutable};
use crate::types::BinaryKind;

mod address;
mod governance;
mod key;
mod node;
mod query;
mod stake_address;
mod transaction;

pub use address::AddressCommands;
pub use governance::{GovernanceCommands, Vote, VoteCreate};
pub use key::KeyCommands;
pub use node::NodeCommands;
pub use query::QueryCommands;
pub use stake_address::{StakeAddressBuild, StakeAddressCommands};
pub use transaction::{TransactionBuild, TransactionBuildRaw, TransactionCommands};

#[derive(Debug, Clone)]
pub struct NodeCli {
    cmd: CommandBuilder,
}

impl NodeCli {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
    ) -> Self {
        let cmd = CommandBuilder::new(executable, runner, &settings.working_dir)
            .with_network(settings.network)
            .scoped(&[settings.era.as_str()]);
        Self { cmd }
    }

    /// Resolve `cardano-cli` from the configuration and point it at the
    /// configured node socket.
    pub fn from_config(
        cfg: &ConfigFile,
        locator: &ExecutableLocator,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let settings = cfg.binary_settings(BinaryKind::NodeCli);
        let executable = Executable::from_settings(locator, &settings)?;
        Ok(Self::new(executable, runner, &settings).with_socket_path(&cfg.node.socket_path))
    }

    pub fn with_socket_path(mut self, socket_path: &Path) -> Self {
        self.cmd = self
            .cmd
            .with_env(NODE_SOCKET_PATH, socket_path.to_string_lossy().into_owned());
        self
    }

    pub fn query(&self) -> QueryCommands {
        QueryCommands::new(self.cmd.scoped(&["query"]))
    }

    pub fn address(&self) -> AddressCommands {
        AddressCommands::new(self.cmd.scoped(&["address"]))
    }

    pub fn stake_address(&self) -> StakeAddressCommands {
        StakeAddressCommands::new(self.cmd.scoped(&["stake-address"]))
    }

    pub fn transaction(&self) -> TransactionCommands {
        TransactionCommands::new(self.cmd.scoped(&["transaction"]))
    }

    pub fn node(&self) -> NodeCommands {
        NodeCommands::new(self.cmd.scoped(&["node"]))
    }

    pub fn governance(&self) -> GovernanceCommands {
        GovernanceCommands::new(self.cmd.scoped(&["governance"]))
    }

    pub fn key(&self) -> KeyCommands {
        KeyCommands::new(self.cmd.scoped(&["key"]))
    }
}

impl VersionedExecutable for NodeCli {
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
