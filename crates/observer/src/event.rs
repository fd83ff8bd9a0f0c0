//! Change notifications delivered on the observer's stream.

/// Kind of filesystem operation a notification describes.
///
/// Only `Write` is produced by the current detection logic; the remaining
/// kinds are reserved for future operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Write,
    Read,
    Open,
    Delete,
}

/// A single change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Operation kind.
    pub op: Op,
    /// Base name of the file the event pertains to (the registry key, not
    /// the full path).
    pub file: String,
}
