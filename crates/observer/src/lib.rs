//! Polling directory observer
//!
//! Watches a directory tree for file changes without OS-level
//! change-notification APIs: every registered file is re-read on a fixed
//! one-second cadence and compared, byte for byte and by modification time,
//! against its last snapshot. Detected changes are delivered as [`Event`]s
//! on a single shared stream.
//!
//! ```no_run
//! # async fn demo() -> Result<(), observer::ObserverError> {
//! let mut observer = observer::Observer::new();
//! observer.add("assets").await?;
//! while let Some(event) = observer.next_event().await {
//!     println!("{} changed ({:?})", event.file, event.op);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod event;

mod observer;
mod poller;
mod registry;
mod traverse;

// Re-exports
pub use error::ObserverError;
pub use event::{Event, Op};
pub use observer::Observer;
