// src/daemons/mod.rs

//! Long-lived Cardano services on top of [`SupervisedProcess`].
//!
//! Each daemon knows how to turn its config section into an argument
//! vector; the lifecycle itself is the supervisor's.

use std::path::Path;
use std::sync::Arc;

use crate::config::BinarySettings;
use crate::errors::Result;
use crate::exec::{CommandRunner, Executable, SupervisedProcess, VersionedExecutable};

pub mod db_sync;
pub mod node;
pub mod ogmios;

pub use db_sync::DbSyncDaemon;
pub use node::NodeDaemon;
pub use ogmios::OgmiosDaemon;

/// A supervised process with a fixed launch argument vector.
pub struct Daemon {
    process: SupervisedProcess<Arc<dyn CommandRunner>>,
    launch_args: Vec<String>,
}

impl Daemon {
    pub fn new(
        executable: Executable,
        runner: Arc<dyn CommandRunner>,
        settings: &BinarySettings,
        launch_args: Vec<String>,
    ) -> Self {
        let process = SupervisedProcess::with_runner(executable, runner)
            .working_dir_in(&settings.working_dir)
            .show_output(settings.show_output);
        Self::with_process(process, launch_args)
    }

    /// Wrap a pre-configured process, e.g. one with a custom grace period.
    pub fn with_process(
        process: SupervisedProcess<Arc<dyn CommandRunner>>,
        launch_args: Vec<String>,
    ) -> Self {
        Self {
            process,
            launch_args,
        }
    }

    pub fn launch_args(&self) -> &[String] {
        &self.launch_args
    }

    pub fn process(&self) -> &SupervisedProcess<Arc<dyn CommandRunner>> {
        &self.process
    }

    pub fn process_mut(&mut self) -> &mut SupervisedProcess<Arc<dyn CommandRunner>> {
        &mut self.process
    }

    pub async fn start(&mut self) -> Result<()> {
        let args = self.launch_args.clone();
        self.process.start_process(args).await
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.process.stop_process().await
    }

    pub fn is_running(&mut self) -> bool {
        self.process.is_running_now()
    }
}

impl VersionedExecutable for Daemon {
    fn executable(&self) -> &Executable {
        self.process.executable()
    }

    fn command_runner(&self) -> &dyn CommandRunner {
        self.process.command_runner()
    }

    fn working_dir(&self) -> &Path {
        VersionedExecutable::working_dir(&self.process)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
