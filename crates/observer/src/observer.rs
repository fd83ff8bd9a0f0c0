//! Observer façade: registration entry point plus the consumer-facing
//! event stream.

use std::env;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::ObserverError;
use crate::event::Event;
use crate::poller;
use crate::registry::FileRegistry;
use crate::traverse;

/// Watches directory trees by polling, delivering one `Write` event per
/// detected change on a shared stream.
///
/// One background task is spawned per registered file. Tasks run until
/// their file becomes unreadable or the observer is dropped; there is no
/// unwatch operation. The event stream has a single slot, so a poller that
/// detected a change waits in its send until the consumer drains — no
/// event is ever dropped, and per-file ordering is preserved.
pub struct Observer {
    registry: FileRegistry,
    events_tx: mpsc::Sender<Event>,
    events_rx: mpsc::Receiver<Event>,
    dir: Option<PathBuf>,
}

impl Observer {
    /// Create an observer with an empty registry and an open event stream.
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(1);

        Self {
            registry: FileRegistry::default(),
            events_tx,
            events_rx,
            dir: None,
        }
    }

    /// Recursively register every regular file under `path` and spawn one
    /// poller per newly registered file.
    ///
    /// `path` may be absolute or relative to the process working
    /// directory. Failure to determine the working directory or to list a
    /// directory aborts the whole registration; a file that cannot be
    /// opened is skipped with a warning. Registration is idempotent per
    /// file name: names already present in the registry are left
    /// untouched, so adding the same root twice is a no-op.
    pub async fn add(&mut self, path: &str) -> Result<(), ObserverError> {
        debug!("adding watch root {}", path);

        let cwd = env::current_dir().map_err(ObserverError::WorkingDir)?;
        let root = traverse::resolve_root(path, &cwd);
        self.dir = Some(cwd);

        for (name, file_path) in traverse::discover(&root)? {
            let registered = self.registry.register(&name, file_path.clone(), || {
                tokio::spawn(poller::run(
                    name.clone(),
                    file_path.clone(),
                    self.events_tx.clone(),
                ))
            });

            if registered {
                info!("file {} registered by observer", name);
            }
        }

        Ok(())
    }

    /// Receive the next change notification, waiting until one arrives.
    ///
    /// Events from a single file arrive in detection order; events from
    /// different files arrive in whatever order their sends complete.
    /// `None` is never returned while the observer itself is alive.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Number of files currently under observation.
    pub fn watched(&self) -> usize {
        self.registry.len()
    }

    /// Whether a file with this base name is under observation.
    pub fn is_watching(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Working directory captured by the most recent registration.
    pub fn working_dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
