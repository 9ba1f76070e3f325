use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Name of the lock file kept inside the data directory
pub const LOCK_FILE: &str = ".tasks.lock";

/// Exclusive advisory lock on the data directory.
///
/// Held around every write so a `tl` command and a running TUI never
/// interleave their writes to the same file. Released on drop.
pub struct DirLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("timed out waiting for {path}: another tl process is writing")]
    Timeout { path: PathBuf },
}

impl DirLock {
    /// Take the lock, retrying until `timeout` elapses.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        while try_lock_exclusive(&file).is_err() {
            if Instant::now() >= deadline {
                return Err(LockError::Timeout { path });
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(DirLock { _file: file, path })
    }

    /// Take the lock with the default two-second budget
    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, Duration::from_secs(2))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// The flock is dropped with the file descriptor. The lock file itself is
// left in place: unlinking it would let a waiter lock a stale inode.

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    // SAFETY: the descriptor is owned by `file` and valid for this call.
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}
