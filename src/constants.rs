//! Constants and configuration values for the hcctl supervisor.

use std::time::Duration;

// ============================================================================
// Launch Constants
// ============================================================================

/// Executable launched by `start` when no `--program` override is given.
pub const DEFAULT_PROGRAM: &str = "homecontrol";

/// Flag instructing the daemon to free its API port before binding.
/// Passed through literally; the daemon interprets it.
pub const CLEAR_PORT_FLAG: &str = "-clearport";

/// Flag instructing the daemon to detach and run in the background.
pub const DAEMON_FLAG: &str = "-daemon";

/// Flag naming the file the daemon writes its own PID into.
pub const PID_FILE_FLAG: &str = "-pid-file";

// ============================================================================
// File System Constants
// ============================================================================

/// PID file location relative to `$HOME`.
pub const PID_FILE_RELATIVE: &str = ".homecontrol/homecontrol.pid";

/// Lock file suffix guarding the launch path against concurrent starts.
pub const LAUNCH_LOCK_SUFFIX: &str = ".lock";

// ============================================================================
// Process Management Timing
// ============================================================================

/// Maximum time `stop` waits for the daemon to exit after SIGINT.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(10);

/// Interval between liveness checks while waiting for the daemon to exit.
pub const STOP_POLL_INTERVAL: Duration = Duration::from_millis(200);
