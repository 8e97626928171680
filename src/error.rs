//! Error handling for hcctl.
use thiserror::Error;

/// Defines all possible errors that can occur in the supervisor.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Error spawning the daemon executable.
    #[error("Failed to launch '{program}': {source}")]
    LaunchError {
        /// The executable that failed to launch.
        program: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error acquiring the exclusive launch lock.
    #[error("Another start is already in progress: {0}")]
    LaunchLockError(#[source] std::io::Error),

    /// Error delivering a signal to the supervised process.
    #[error("Failed to signal PID {pid}: {source}")]
    SignalError {
        /// The PID the signal was addressed to.
        pid: u32,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error for PID file.
    #[error("PID file error: {0}")]
    PidFileError(#[from] PidFileError),
}

/// Error type for PID file operations.
#[derive(Debug, Error)]
pub enum PidFileError {
    /// Error reading the PID file from disk.
    #[error("Failed to read PID file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the PID file contents.
    #[error("PID file does not contain a valid PID: '{0}'")]
    ParseError(String),
}
