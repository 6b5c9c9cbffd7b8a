// src/exec/liveness.rs

//! Liveness tracking for supervised processes.
//!
//! The answer to "is it still running?" is layered:
//!
//! 1. a terminated flag set by `stop()` always wins;
//! 2. the OS-reported state of the child handle;
//! 3. a signal-0 probe of the pid, because the OS-reported state can lag
//!    behind a natural exit on some platforms.
//!
//! No step may block or panic. An inconclusive probe falls back to the
//! OS-reported state, or the last known state when that is unavailable too.

use std::fmt::Debug;

use tracing::trace;

/// What the child handle reports about the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsLiveness {
    Running,
    Exited,
    /// The handle could not be queried.
    Unknown,
}

/// Result of probing a pid without disturbing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Signal delivery would succeed.
    Alive,
    /// `ESRCH`.
    NoSuchProcess,
    /// `EPERM`: the process exists but belongs to someone else.
    PermissionDenied,
    Inconclusive,
}

pub trait LivenessProbe: Send + Sync + Debug {
    fn probe(&self, pid: u32) -> ProbeOutcome;
}

/// Probe using `kill(pid, 0)`; no signal is actually delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProbe;

impl LivenessProbe for SignalProbe {
    #[cfg(unix)]
    fn probe(&self, pid: u32) -> ProbeOutcome {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            return ProbeOutcome::Inconclusive;
        };
        match kill(Pid::from_raw(raw), None) {
            Ok(()) => ProbeOutcome::Alive,
            Err(Errno::ESRCH) => ProbeOutcome::NoSuchProcess,
            Err(Errno::EPERM) => ProbeOutcome::PermissionDenied,
            Err(_) => ProbeOutcome::Inconclusive,
        }
    }

    #[cfg(not(unix))]
    fn probe(&self, _pid: u32) -> ProbeOutcome {
        ProbeOutcome::Inconclusive
    }
}

/// Bookkeeping for one start cycle of a supervised process.
#[derive(Debug, Clone, Default)]
pub struct LivenessGuard {
    pid: Option<u32>,
    terminated: bool,
    last_known_running: bool,
}

impl LivenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pid of a freshly launched process.
    pub fn register(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.terminated = false;
        self.last_known_running = true;
    }

    pub fn mark_terminated(&mut self) {
        self.terminated = true;
        self.last_known_running = false;
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Combine the terminated flag, the OS-reported state and a probe.
    pub fn resolve(&mut self, os: OsLiveness, probe: &dyn LivenessProbe) -> bool {
        if self.terminated {
            return false;
        }
        let Some(pid) = self.pid else {
            return false;
        };

        let os_flag = match os {
            OsLiveness::Exited => {
                self.last_known_running = false;
                return false;
            }
            OsLiveness::Running => true,
            OsLiveness::Unknown => self.last_known_running,
        };

        let outcome = probe.probe(pid);
        let alive = match outcome {
            ProbeOutcome::NoSuchProcess => false,
            ProbeOutcome::PermissionDenied => true,
            ProbeOutcome::Alive | ProbeOutcome::Inconclusive => os_flag,
        };
        trace!(pid, ?os, ?outcome, alive, "resolved process liveness");

        self.last_known_running = alive;
        alive
    }
}
