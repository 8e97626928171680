//! Daemon lifecycle control.
//!
//! The supervisor never manages the daemon's PID file contents: the daemon
//! detaches itself and records its own PID. Everything here works from that
//! file plus POSIX signals, so a stale file (process gone, file left behind)
//! must read as "stopped" on every path.

use std::{
    process::Command,
    thread,
    time::Instant,
};

use nix::{
    errno::Errno,
    sys::signal::{self, Signal},
    unistd::Pid,
};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::SupervisorError,
    pidfile::PidFile,
    status::{self, DaemonState},
};

/// Outcome of a `start` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The launch command exited successfully and the daemon is detaching.
    Started,
    /// A live daemon already owns the PID file; nothing was launched.
    AlreadyRunning(u32),
    /// The launch command exited with a non-zero status.
    Failed(Option<i32>),
}

/// Outcome of a `stop` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The daemon exited within the configured timeout.
    Stopped,
    /// No live daemon was found behind the PID file.
    AlreadyStopped,
    /// SIGINT was delivered but the daemon was still alive at the deadline.
    TimedOut,
}

/// Controls the lifecycle of the external daemon process.
pub struct Supervisor {
    config: Config,
    pid_file: PidFile,
}

impl Supervisor {
    /// Creates a supervisor for the daemon described by `config`.
    pub fn new(config: Config) -> Self {
        let pid_file = PidFile::new(config.pid_file.clone());
        Self { config, pid_file }
    }

    /// Launches the daemon in the background.
    ///
    /// The daemon is started from the configured working directory with the
    /// fixed pass-through flags asking it to clear its port, detach, and
    /// write its PID file. The launch command's own exit status is the
    /// success signal; the detached process keeps running afterwards.
    pub fn start(&self) -> Result<StartOutcome, SupervisorError> {
        let _lock = self
            .pid_file
            .launch_lock()
            .map_err(SupervisorError::LaunchLockError)?;

        if let Some(pid) = self.running_pid() {
            debug!("{} already running with PID {pid}", self.config.program);
            return Ok(StartOutcome::AlreadyRunning(pid));
        }

        info!(
            "Launching {} from {:?}",
            self.config.program, self.config.working_dir
        );
        let status = Command::new(&self.config.program)
            .args(self.config.launch_args())
            .current_dir(&self.config.working_dir)
            .status()
            .map_err(|source| SupervisorError::LaunchError {
                program: self.config.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(StartOutcome::Started)
        } else {
            warn!("{} exited with {status} during startup", self.config.program);
            Ok(StartOutcome::Failed(status.code()))
        }
    }

    /// Requests a graceful shutdown via SIGINT and waits for the daemon to
    /// exit, polling liveness until the configured timeout. Never blocks
    /// longer than that timeout.
    pub fn stop(&self) -> Result<StopOutcome, SupervisorError> {
        let pid = match self.pid_file.read() {
            Ok(Some(pid)) => pid,
            Ok(None) => return Ok(StopOutcome::AlreadyStopped),
            Err(err) => {
                debug!("Treating unreadable PID file as stopped: {err}");
                return Ok(StopOutcome::AlreadyStopped);
            }
        };

        let target = Pid::from_raw(pid as i32);
        match signal::kill(target, Signal::SIGINT) {
            Ok(()) => debug!("Sent SIGINT to PID {pid}"),
            Err(Errno::ESRCH) => {
                debug!("PID {pid} no longer exists; clearing stale PID file");
                self.pid_file.remove_stale()?;
                return Ok(StopOutcome::AlreadyStopped);
            }
            Err(err) => {
                return Err(SupervisorError::SignalError {
                    pid,
                    source: std::io::Error::from_raw_os_error(err as i32),
                });
            }
        }

        if self.wait_for_exit(pid) {
            info!("PID {pid} exited within {:?}", self.config.stop_timeout);
            Ok(StopOutcome::Stopped)
        } else {
            warn!(
                "PID {pid} still alive after {:?}",
                self.config.stop_timeout
            );
            Ok(StopOutcome::TimedOut)
        }
    }

    /// Queries liveness of the recorded daemon process. Read-only: a stale
    /// PID file is reported as stopped but left in place.
    pub fn status(&self) -> (DaemonState, Option<u32>) {
        match self.running_pid() {
            Some(pid) => (DaemonState::Running, Some(pid)),
            None => (DaemonState::Stopped, None),
        }
    }

    /// Stops the daemon if it is running, then starts it again. A failed
    /// stop does not prevent the subsequent start.
    pub fn restart(
        &self,
    ) -> (
        Result<StopOutcome, SupervisorError>,
        Result<StartOutcome, SupervisorError>,
    ) {
        let stop = self.stop();
        if let Err(err) = &stop {
            warn!("Ignoring stop failure during restart: {err}");
        }

        let start = self.start();
        (stop, start)
    }

    /// Reads the PID file and probes the recorded PID, ignoring stale or
    /// unreadable entries.
    fn running_pid(&self) -> Option<u32> {
        match self.pid_file.read() {
            Ok(Some(pid)) if status::process_alive(pid) => Some(pid),
            Ok(_) => None,
            Err(err) => {
                debug!("Ignoring unreadable PID file: {err}");
                None
            }
        }
    }

    /// Polls for process exit, sleeping between liveness checks.
    fn wait_for_exit(&self, pid: u32) -> bool {
        let deadline = Instant::now() + self.config.stop_timeout;
        loop {
            if !status::process_alive(pid) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(self.config.poll_interval);
        }
    }
}
