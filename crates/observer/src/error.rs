//! Errors surfaced by watch-session registration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal-to-session errors raised while registering a root path.
///
/// Per-file failures (a file that cannot be opened or re-read) never appear
/// here: they are logged and contained within the affected file's poller.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The process working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] io::Error),

    /// The root path could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory below the root could not be enumerated.
    #[error("failed to enumerate watch root: {0}")]
    Walk(#[from] walkdir::Error),
}
