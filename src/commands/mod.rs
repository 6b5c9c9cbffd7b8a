// src/commands/mod.rs

//! Typed command builders for the wrapped one-shot binaries.
//!
//! Each facade turns typed parameters into an ordered argument vector and
//! hands it to a [`CommandRunner`]. Parameter checks run first, so a call
//! rejected with `InvalidParameters` never launches anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, Invocation};
use crate::types::NetworkSelector;

pub mod decode;
pub mod hw_cli;
pub mod mithril;
pub mod node_cli;
pub mod params;

pub use decode::{Beacon, ChainTip, Snapshot, StakeAddressInfo};
pub use hw_cli::{AddressShow, HwCli};
pub use mithril::MithrilClient;
pub use node_cli::NodeCli;
pub use params::{exactly_one_of, Flags};

/// Shared argument assembly for one binary.
///
/// Holds the base tokens every command of a facade starts with (for example
/// the era for `cardano-cli`), the network selector appended to
/// network-sensitive commands, and environment overrides for each call.
/// Cloning is cheap enough to derive a sub-area builder per call.
#[derive(Clone)]
pub struct CommandBuilder {
    executable: Executable,
    runner: Arc<dyn CommandRunner>,
    working_dir: PathBuf,
    base: Vec<String>,
    network: Option<NetworkSelector>,
    env: Vec<(String, String)>,
}

impl std::fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("executable", &self.executable)
            .field("working_dir", &self.working_dir)
            .field("base", &self.base)
            .field("network", &self.network)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl CommandBuilder {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable,
            runner,
            working_dir: working_dir.into(),
            base: Vec::new(),
            network: None,
            env: Vec::new(),
        }
    }

    pub fn with_network(mut self, network: NetworkSelector) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// A copy of this builder with extra base tokens appended.
    pub fn scoped(&self, tokens: &[&str]) -> Self {
        let mut next = self.clone();
        next.base.extend(tokens.iter().map(|t| t.to_string()));
        next
    }

    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn network(&self) -> Option<NetworkSelector> {
        self.network
    }

    /// Base tokens, then `sub`, then `flags`, then (if requested and
    /// configured) the network selector.
    pub fn compose(&self, sub: &[&str], flags: Flags, with_network: bool) -> Vec<String> {
        let mut args = self.base.clone();
        args.extend(sub.iter().map(|s| s.to_string()));
        args.extend(flags.into_args());
        if with_network {
            if let Some(network) = self.network {
                args.extend(network.flags());
            }
        }
        args
    }

    pub fn invocation(&self, args: Vec<String>) -> Invocation {
        Invocation::new(self.executable.path(), args, &self.working_dir).with_envs(&self.env)
    }

    /// Run a command without network flags and return trimmed stdout.
    pub async fn run(&self, sub: &[&str], flags: Flags) -> Result<String> {
        self.dispatch(self.compose(sub, flags, false)).await
    }

    /// Run a network-sensitive command.
    pub async fn run_on_network(&self, sub: &[&str], flags: Flags) -> Result<String> {
        self.dispatch(self.compose(sub, flags, true)).await
    }

    /// Run and split stdout into non-empty lines.
    pub async fn run_lines(&self, sub: &[&str], flags: Flags, with_network: bool) -> Result<Vec<String>> {
        let out = self.dispatch(self.compose(sub, flags, with_network)).await?;
        Ok(decode::split_lines(&out))
    }

    /// Run and decode stdout as JSON.
    pub async fn run_json<T: DeserializeOwned>(
        &self,
        sub: &[&str],
        flags: Flags,
        with_network: bool,
    ) -> Result<T> {
        let args = self.compose(sub, flags, with_network);
        let context = format!("{} {}", self.executable.name(), args.join(" "));
        let out = self.dispatch(args).await?;
        decode::parse_json(&context, &out)
    }

    async fn dispatch(&self, args: Vec<String>) -> Result<String> {
        let invocation = self.invocation(args);
        debug!(command = %invocation.display_command(), "dispatching command");
        self.runner.run(invocation).await
    }
}
