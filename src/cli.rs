//! Command-line interface for hcctl.
use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::{Parser, Subcommand, error::ErrorKind};
use tracing::level_filters::LevelFilter;

use crate::config::parse_duration;

/// Wrapper around `LevelFilter` so clap can parse log levels from their
/// string names ("info", "debug", etc.).
#[derive(Clone, Copy, Debug)]
pub struct LogLevelArg(LevelFilter);

impl LogLevelArg {
    /// String representation suitable for `RUST_LOG`.
    pub fn as_str(&self) -> &'static str {
        match self.0 {
            LevelFilter::OFF => "off",
            LevelFilter::ERROR => "error",
            LevelFilter::WARN => "warn",
            LevelFilter::INFO => "info",
            LevelFilter::DEBUG => "debug",
            LevelFilter::TRACE => "trace",
        }
    }
}

impl FromStr for LogLevelArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let level = match value.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::OFF,
            "error" | "err" => LevelFilter::ERROR,
            "warn" | "warning" => LevelFilter::WARN,
            "info" => LevelFilter::INFO,
            "debug" => LevelFilter::DEBUG,
            "trace" => LevelFilter::TRACE,
            other => return Err(format!("invalid log level '{other}'")),
        };

        Ok(LogLevelArg(level))
    }
}

/// Command-line interface for hcctl.
#[derive(Parser)]
#[command(name = "hcctl", version, author)]
#[command(about = "A minimal lifecycle controller for the HomeControl daemon", long_about = None)]
pub struct Cli {
    /// Override the logging verbosity for this invocation only.
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Launch the daemon from this directory instead of `$HOME`.
    #[arg(long, value_name = "DIR", global = true)]
    pub working_dir: Option<PathBuf>,

    /// Daemon executable to launch (defaults to `homecontrol`).
    #[arg(long, value_name = "PROGRAM", global = true)]
    pub program: Option<String>,

    /// Location of the PID file the daemon writes.
    #[arg(long, value_name = "PATH", global = true)]
    pub pid_file: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for hcctl.
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the daemon in the background.
    Start,

    /// Gracefully stop the running daemon.
    Stop {
        /// Maximum time to wait for the daemon to exit (e.g., "10", "500ms").
        #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
        timeout: Option<Duration>,
    },

    /// Stop the daemon if it is running, then start it again.
    #[command(visible_alias = "reload")]
    Restart {
        /// Maximum time to wait for the daemon to exit (e.g., "10", "500ms").
        #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
        timeout: Option<Duration>,
    },

    /// Report whether the daemon is currently running.
    Status {
        /// Emit machine-readable JSON output instead of a message.
        #[arg(long)]
        json: bool,

        /// Disable ANSI colors in output.
        #[arg(long = "no-color")]
        no_color: bool,
    },
}

/// Parses command-line arguments and returns a `Cli` struct.
///
/// Invalid invocations print usage and exit with code 1; help and version
/// requests exit with code 0.
pub fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    std::process::exit(0)
                }
                _ => std::process::exit(1),
            }
        }
    }
}
