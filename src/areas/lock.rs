//! Advisory repository lock
//!
//! Mutating commands hold an exclusive OS-level lock on `.dotgit/dotgit.lock`
//! for their whole load-mutate-save cycle, so two invocations cannot
//! interleave updates to the index or the refs. The lock is released when the
//! guard is dropped, on every exit path.

use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCK_FILE_NAME: &str = "dotgit.lock";

pub struct RepositoryLock {
    path: PathBuf,
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    /// Block until the exclusive lock on `<repository_dir>/dotgit.lock` is held
    pub fn acquire(repository_dir: &Path) -> anyhow::Result<Self> {
        let path = repository_dir.join(LOCK_FILE_NAME);

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("failed to open lock file at {:?}", path))?;

        let guard = file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("failed to lock {:?}", path))?;
        debug!(path = %path.display(), "acquired repository lock");

        Ok(RepositoryLock {
            path,
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for RepositoryLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryLock")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for RepositoryLock {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "releasing repository lock");
    }
}
