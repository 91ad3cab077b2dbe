//! Process-level exclusive lock for the wizard state tree.
//!
//! At most one mutating command holds the state tree at any time; overlapping
//! invocations (the double-click problem in the browser ancestor) queue behind
//! the lock instead of issuing duplicate work. Released when the guard drops.

use crate::config::Config;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Name of the lock file under the state root
const LOCK_FILE_NAME: &str = ".autoblog.lock";

/// Backoff between try_lock attempts.
const POLL_INTERVAL_MS: u64 = 100;

/// Guard that holds the exclusive lock; releasing on drop.
pub struct StateLockGuard {
    _file: std::fs::File,
}

/// Acquires an exclusive lock on the state root, waiting up to
/// `lock_timeout_secs`. Returns a guard that releases the lock when dropped.
pub fn acquire_state_lock(config: &Config) -> Result<StateLockGuard> {
    let state_root = config.paths.state_root.as_path();
    let lock_path = state_root.join(LOCK_FILE_NAME);
    let timeout_secs = config.concurrency.lock_timeout_secs;

    // State storage is always available: create the root on first use
    std::fs::create_dir_all(state_root)
        .with_context(|| format!("Failed to create state root: {}", state_root.display()))?;

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    let deadline = Instant::now() + Duration::from_secs(timeout_secs);
    let poll = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                return Ok(StateLockGuard { _file: file });
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    anyhow::bail!(
                        "Another autoblog command is in progress. \
                         Wait for it to finish or retry later. \
                         (Timed out after {} seconds waiting for exclusive access.)",
                        timeout_secs
                    );
                }
                thread::sleep(poll);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_file_name_is_under_state_root() {
        assert_eq!(LOCK_FILE_NAME, ".autoblog.lock");
    }
}
