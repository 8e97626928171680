//! Status probing and reporting for the supervised daemon.
use serde::Serialize;
use tracing::debug;

#[cfg(not(target_os = "linux"))]
use nix::{errno::Errno, sys::signal, unistd::Pid};
#[cfg(target_os = "linux")]
use std::{fs, path::Path};

const GREEN_BOLD: &str = "\x1b[1;32m"; // Bright Green
const RED_BOLD: &str = "\x1b[1;31m"; // Bright Red
const RESET: &str = "\x1b[0m"; // Reset color

/// Liveness states derived from probing the recorded PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaemonState {
    Running,
    Stopped,
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessState {
    Running,
    Zombie,
    Missing,
}

fn process_state(pid: u32) -> ProcessState {
    #[cfg(target_os = "linux")]
    {
        let proc_path = format!("/proc/{pid}");
        if !Path::new(&proc_path).exists() {
            return ProcessState::Missing;
        }

        if let Some(state) = read_proc_state(pid)
            && matches!(state, 'Z' | 'X')
        {
            return ProcessState::Zombie;
        }

        ProcessState::Running
    }

    #[cfg(not(target_os = "linux"))]
    {
        let target = Pid::from_raw(pid as i32);
        match signal::kill(target, None) {
            Ok(_) => ProcessState::Running,
            Err(err) => {
                if err == Errno::ESRCH {
                    ProcessState::Missing
                } else {
                    // EPERM and friends mean the process exists but is not ours.
                    debug!("Liveness probe for PID {pid} returned {err}; assuming alive");
                    ProcessState::Running
                }
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn read_proc_state(pid: u32) -> Option<char> {
    let stat_path_str = format!("/proc/{pid}/stat");
    let contents = fs::read_to_string(Path::new(&stat_path_str)).ok()?;
    let mut parts = contents.split_whitespace();
    parts.next()?; // pid
    let mut name_part = parts.next()?; // (comm)
    // The state follows the command, but the command may contain spaces. The
    // stat format wraps the executable name in parentheses, so consume until
    // the closing ')'.
    if !name_part.ends_with(')') {
        for part in parts.by_ref() {
            name_part = part;
            if name_part.ends_with(')') {
                break;
            }
        }
    }

    parts.next()?.chars().next()
}

/// Returns whether `pid` refers to a live process. Zombies count as dead:
/// a daemon that has exited but not yet been reaped no longer serves anything.
pub fn process_alive(pid: u32) -> bool {
    let state = process_state(pid);
    if state != ProcessState::Running {
        debug!("Liveness probe for PID {pid}: {state:?}");
    }
    state == ProcessState::Running
}

/// Machine-readable status report emitted by `status --json`.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    program: &'a str,
    status: DaemonState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pid: Option<u32>,
}

/// Renders status reports for the supervised daemon.
pub struct StatusManager {
    json: bool,
    color: bool,
}

impl StatusManager {
    /// Creates a new `StatusManager` instance.
    pub fn new(json: bool, no_color: bool) -> Self {
        Self {
            json,
            color: !no_color,
        }
    }

    /// Prints the status of the daemon to stdout.
    pub fn report(&self, program: &str, state: DaemonState, pid: Option<u32>) {
        if self.json {
            let report = StatusReport {
                program,
                status: state,
                pid,
            };
            println!("{}", serde_json::to_string(&report).unwrap_or_default());
            return;
        }

        let (label, color) = match state {
            DaemonState::Running => ("running", GREEN_BOLD),
            DaemonState::Stopped => ("stopped", RED_BOLD),
        };

        let label = if self.color {
            format!("{color}{label}{RESET}")
        } else {
            label.to_string()
        };

        match pid {
            Some(pid) => println!("{program} is {label} (PID {pid})"),
            None => println!("{program} is {label}"),
        }
    }
}
