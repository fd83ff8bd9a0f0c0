//! Per-file change-detection poll loop.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::{Event, Op};

/// Fixed cadence between successive reads of a watched file.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Last observed state of a watched file: full content bytes plus the
/// second-granularity Unix modification time.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Snapshot {
    content: Vec<u8>,
    mtime_secs: i64,
}

impl Snapshot {
    /// Read the file's current content and modification time.
    pub(crate) async fn read(path: &Path) -> io::Result<Self> {
        let content = tokio::fs::read(path).await?;
        let metadata = tokio::fs::metadata(path).await?;
        let mtime_secs = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);

        Ok(Self { content, mtime_secs })
    }
}

/// Poll `path` until a read fails or the session ends, publishing one
/// `Write` event per detected difference.
///
/// Read failures terminate only this file's watcher: the file stays
/// registered but produces no further events, and the consumer is not
/// notified. The snapshot is owned here exclusively (single writer).
pub(crate) async fn run(name: String, path: PathBuf, events: mpsc::Sender<Event>) {
    let mut prev = match Snapshot::read(&path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("initial read of {} failed, not watching: {}", path.display(), e);
            return;
        }
    };

    // Sleeping before the first comparison guards against a spurious event
    // for the initial read: the first interval after registration never
    // emits.
    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        let state = match Snapshot::read(&path).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("re-read of {} failed, watcher stopping: {}", path.display(), e);
                return;
            }
        };

        // Byte comparison catches content changes too fast for mtime
        // granularity; the mtime check catches touches that left content
        // identical. Either way, one event per detected difference.
        if state.content != prev.content || state.mtime_secs != prev.mtime_secs {
            debug!("change detected in {}", name);
            prev = state;

            let event = Event {
                op: Op::Write,
                file: name.clone(),
            };
            if events.send(event).await.is_err() {
                // Receiver dropped: the session is over.
                return;
            }
        }
    }
}
