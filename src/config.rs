//! Configuration management for hcctl.
//!
//! Every knob has a fixed default matching the deployment the supervisor was
//! written for; the CLI can override them per invocation. There is no
//! configuration file.

use std::{
    env,
    path::PathBuf,
    time::Duration,
};

use crate::{
    cli::{Cli, Commands},
    constants::{
        CLEAR_PORT_FLAG, DAEMON_FLAG, DEFAULT_PROGRAM, DEFAULT_STOP_TIMEOUT,
        PID_FILE_FLAG, PID_FILE_RELATIVE, STOP_POLL_INTERVAL,
    },
};

/// Runtime configuration for the supervisor.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the daemon is launched from.
    pub working_dir: PathBuf,
    /// Executable launched by `start`.
    pub program: String,
    /// Location of the PID file written by the daemon.
    pub pid_file: PathBuf,
    /// Maximum time `stop` waits for the daemon to exit.
    pub stop_timeout: Duration,
    /// Interval between liveness checks while waiting for exit.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"));

        Self {
            working_dir: home.clone(),
            program: DEFAULT_PROGRAM.to_string(),
            pid_file: home.join(PID_FILE_RELATIVE),
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            poll_interval: STOP_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Builds the effective configuration from CLI overrides.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();

        if let Some(dir) = &cli.working_dir {
            config.working_dir = dir.clone();
        }
        if let Some(program) = &cli.program {
            config.program = program.clone();
        }
        if let Some(path) = &cli.pid_file {
            config.pid_file = path.clone();
        }

        match &cli.command {
            Commands::Stop { timeout } | Commands::Restart { timeout } => {
                if let Some(timeout) = timeout {
                    config.stop_timeout = *timeout;
                }
            }
            Commands::Start | Commands::Status { .. } => {}
        }

        config
    }

    /// Arguments passed through to the daemon on launch. The flags are the
    /// daemon's own single-dash argparse spellings and must stay literal.
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            CLEAR_PORT_FLAG.to_string(),
            DAEMON_FLAG.to_string(),
            PID_FILE_FLAG.to_string(),
            self.pid_file.display().to_string(),
        ]
    }
}

/// Parses a duration given as bare seconds or with an `ms`, `s`, or `m`
/// suffix (e.g., "10", "500ms", "2m").
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("duration value cannot be empty".to_string());
    }

    let (amount_str, unit_millis) = if let Some(stripped) = value.strip_suffix("ms") {
        (stripped.trim(), 1)
    } else if let Some(stripped) = value.strip_suffix('s') {
        (stripped.trim(), 1000)
    } else if let Some(stripped) = value.strip_suffix('m') {
        (stripped.trim(), 60_000)
    } else {
        (value, 1000)
    };

    let amount: u64 = amount_str
        .parse()
        .map_err(|_| format!("invalid duration value: '{raw}'"))?;

    Ok(Duration::from_millis(amount.saturating_mul(unit_millis)))
}
