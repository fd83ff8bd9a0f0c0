//! Root resolution and recursive file discovery.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::ObserverError;

/// Resolve a caller-supplied root against the working directory.
///
/// A path that already contains the working directory as a substring, or
/// that begins with the root separator, is taken as-is; anything else is
/// joined onto the working directory. This is a heuristic, not a
/// canonicalization: `.`/`..` segments and symlinks are left alone.
pub(crate) fn resolve_root(path: &str, cwd: &Path) -> PathBuf {
    let already_absolute = path.starts_with(MAIN_SEPARATOR)
        || cwd.to_str().is_some_and(|dir| path.contains(dir));

    if already_absolute {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

/// Outcome of classifying one enumerated entry.
pub(crate) enum Discovery {
    /// A regular file that opened successfully; register and watch it.
    Watch { name: String, path: PathBuf },
    /// A file that could not be opened; logged and left unregistered.
    Skip { path: PathBuf, error: io::Error },
    /// Enumeration itself failed; fatal to the whole traversal.
    Fatal(walkdir::Error),
}

/// Classify one walk result. Directories are not surfaced (the walker
/// recurses into them itself) and yield `None`, as do symlinks and other
/// non-regular entries.
pub(crate) fn classify(entry: walkdir::Result<walkdir::DirEntry>) -> Option<Discovery> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => return Some(Discovery::Fatal(e)),
    };

    if !entry.file_type().is_file() {
        return None;
    }

    let path = entry.path().to_path_buf();

    // Readability probe: a file that cannot be opened now is skipped for
    // the whole session rather than registered and left to fail later.
    match File::open(&path) {
        Ok(_) => {
            let name = entry.file_name().to_string_lossy().into_owned();
            Some(Discovery::Watch { name, path })
        }
        Err(error) => Some(Discovery::Skip { path, error }),
    }
}

/// Enumerate every regular file under `root`.
///
/// Failure to list the root or any directory below it aborts the traversal;
/// files that fail to open are logged at `warn` and skipped.
pub(crate) fn discover(root: &Path) -> Result<Vec<(String, PathBuf)>, ObserverError> {
    // Listability check up front so a missing or non-directory root fails
    // with the underlying io error rather than partway into the walk.
    std::fs::read_dir(root).map_err(|source| ObserverError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match classify(entry) {
            Some(Discovery::Watch { name, path }) => found.push((name, path)),
            Some(Discovery::Skip { path, error }) => {
                warn!("failed to open {}, skipping: {}", path.display(), error);
            }
            Some(Discovery::Fatal(e)) => return Err(e.into()),
            None => {}
        }
    }

    Ok(found)
}
