//! PID file handling for the supervised daemon.
//!
//! The PID file is written by the daemon itself once it has detached; the
//! supervisor only ever reads it. A file that names a dead process is stale
//! and reads as "stopped" rather than being an error.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use fs2::FileExt;
use tracing::debug;

use crate::{constants::LAUNCH_LOCK_SUFFIX, error::PidFileError};

/// Handle to the single-line PID file written by the daemon.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Creates a handle for the PID file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the PID file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the recorded PID. Returns `Ok(None)` when the file is absent.
    pub fn read(&self) -> Result<Option<u32>, PidFileError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PidFileError::ReadError(err)),
        };

        let line = contents.trim();
        line.parse::<u32>()
            .map(Some)
            .map_err(|_| PidFileError::ParseError(line.to_string()))
    }

    /// Removes a stale PID file. A missing file is not an error.
    pub fn remove_stale(&self) -> Result<(), PidFileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed stale PID file {:?}", self.path);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PidFileError::ReadError(err)),
        }
    }

    /// Acquires the exclusive advisory lock guarding the launch path, held
    /// for the lifetime of the returned guard. A second concurrent `start`
    /// fails here instead of racing the first one to the PID file.
    pub fn launch_lock(&self) -> Result<LaunchLock, io::Error> {
        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(LAUNCH_LOCK_SUFFIX);
        let lock_path = PathBuf::from(lock_path);

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.try_lock_exclusive()?;

        Ok(LaunchLock { file })
    }
}

/// Exclusive advisory lock held for the duration of a launch.
#[derive(Debug)]
pub struct LaunchLock {
    file: fs::File,
}

impl Drop for LaunchLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
