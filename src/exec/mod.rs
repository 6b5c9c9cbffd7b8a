// src/exec/mod.rs

//! Process execution layer.
//!
//! Everything that touches an OS process lives here:
//!
//! - [`locator`] resolves and validates executables on disk.
//! - [`executable`] holds the immutable per-binary descriptor.
//! - [`invoker`] runs one-shot commands and captures their output.
//! - [`supervisor`] starts and stops long-lived daemons.
//! - [`liveness`] decides whether a supervised pid is still alive.
//! - [`version`] compares reported versions against a minimum.
//!
//! The capability traits below are the seams the command builders and the
//! daemon wrappers are written against, so tests can swap in a spy runner
//! that never spawns anything.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::{CardanoError, Result};

pub mod executable;
pub mod invoker;
pub mod liveness;
pub mod locator;
pub mod supervisor;
pub mod version;

pub use executable::Executable;
pub use invoker::{InvocationOutput, ProcessInvoker};
pub use liveness::{LivenessGuard, LivenessProbe, OsLiveness, ProbeOutcome, SignalProbe};
pub use locator::ExecutableLocator;
pub use supervisor::{ProcessState, SupervisedProcess, DEFAULT_GRACE_PERIOD};

/// Boxed future used by the object-safe capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One request to run an executable: program, ordered arguments, working
/// directory and per-invocation environment overrides.
///
/// The parent environment is inherited; `env` only overrides the listed
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_envs(mut self, vars: &[(String, String)]) -> Self {
        self.env.extend(vars.iter().cloned());
        self
    }

    /// Build a `CommandFailed` error carrying this invocation's argv.
    pub fn failure(&self, message: impl Into<String>) -> CardanoError {
        CardanoError::CommandFailed {
            program: self.program.clone(),
            args: self.args.clone(),
            message: message.into(),
        }
    }

    /// The command line as an operator would type it.
    pub fn display_command(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Capability: run a one-shot command and return its trimmed stdout.
///
/// Production code uses [`ProcessInvoker`]; tests provide a spy that records
/// invocations and returns canned output.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: Invocation) -> BoxFuture<'_, Result<String>>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    fn run(&self, invocation: Invocation) -> BoxFuture<'_, Result<String>> {
        (**self).run(invocation)
    }
}

/// Capability: an executable that can report and gate its version.
///
/// The version query goes through the [`CommandRunner`] the implementor
/// exposes, so it never depends on any supervised-process state.
pub trait VersionedExecutable {
    fn executable(&self) -> &Executable;

    /// Runner used for the version query.
    fn command_runner(&self) -> &dyn CommandRunner;

    /// Working directory used for the version query.
    fn working_dir(&self) -> &Path;

    /// Raw output of the binary's version command.
    fn version(&self) -> BoxFuture<'_, Result<String>> {
        let exe = self.executable();
        let invocation = Invocation::new(exe.path(), exe.version_args().to_vec(), self.working_dir());
        self.command_runner().run(invocation)
    }

    /// Query the version and fail closed when it is older than the minimum.
    ///
    /// Returns the extracted version string on success.
    fn check_version(&self) -> BoxFuture<'_, Result<String>> {
        let name = self.executable().name().to_string();
        let minimum = self.executable().min_version().to_string();
        let raw = self.version();
        Box::pin(async move {
            let raw = raw.await?;
            version::check_reported(&name, &raw, &minimum)
        })
    }
}

/// Capability: a long-lived process with a start/stop lifecycle.
pub trait SupervisedRunner: VersionedExecutable {
    fn start(&mut self, args: Vec<String>) -> BoxFuture<'_, Result<()>>;
    fn stop(&mut self) -> BoxFuture<'_, Result<()>>;
    fn is_running(&mut self) -> bool;
}
