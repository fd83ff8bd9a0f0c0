//! Guarded mapping from file name to watched-file state.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// State kept for a single file under observation.
///
/// The content snapshot lives inside the file's poller task (it has exactly
/// one writer); the registry keeps the resolved path and the task handle so
/// a future unwatch operation can cancel the poller.
pub(crate) struct WatchedFile {
    pub(crate) path: PathBuf,
    /// Unused by the current contract: there is no unwatch operation.
    #[allow(dead_code)]
    pub(crate) task: JoinHandle<()>,
}

/// Mutex-guarded registry enforcing at-most-one watcher per file name.
///
/// Files are keyed by base name, not full path: two files sharing a name in
/// different subdirectories collapse into a single entry, and only the
/// first one discovered is watched.
#[derive(Default)]
pub(crate) struct FileRegistry {
    files: Mutex<HashMap<String, WatchedFile>>,
}

impl FileRegistry {
    /// Insert `name` unless it is already present, launching its poller via
    /// `spawn` while the lock is held. Returns `false` for duplicates,
    /// which are left untouched (first registration wins).
    pub(crate) fn register<F>(&self, name: &str, path: PathBuf, spawn: F) -> bool
    where
        F: FnOnce() -> JoinHandle<()>,
    {
        let mut files = self.files.lock();
        if files.contains_key(name) {
            return false;
        }

        let task = spawn();
        files.insert(name.to_owned(), WatchedFile { path, task });
        true
    }

    /// Number of registered files.
    pub(crate) fn len(&self) -> usize {
        self.files.lock().len()
    }

    /// Whether `name` is registered.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }
}
