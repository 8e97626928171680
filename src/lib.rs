//! Hcctl is a minimal lifecycle controller for the HomeControl home-automation
//! daemon. It launches the daemon in the background, tracks it through the PID
//! file the daemon writes itself, and drives it via POSIX signals with four
//! commands: start, stop, status, and restart.

/// CLI interface.
pub mod cli;

/// Configuration management.
pub mod config;

/// Shared constants.
pub mod constants;

/// Daemon lifecycle control.
pub mod daemon;

/// Error handling.
pub mod error;

/// PID file handling.
pub mod pidfile;

/// Status probing and reporting.
pub mod status;
