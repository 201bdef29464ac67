//! Directory-tree replication engine for treecopy
//!
//! Copies a source directory, with every nested directory and file, to a new
//! directory under a destination parent. The copy is all-or-nothing: if any
//! directory creation or file copy fails, the partially written destination
//! tree is deleted before the error is returned.
//!
//! # Features
//!
//! - **Iterative traversal**: an explicit per-call work stack, so tree depth
//!   never grows the call stack
//! - **Scoped rollback**: the destination root is removed on failure, and a
//!   failed removal is reported next to the original error
//! - **Long paths**: deep destinations get the Windows extended-length prefix
//! - **Pluggable filesystem**: the engine only talks to
//!   [`FileSystem`](treecopy_types::FileSystem)
//!
//! # Examples
//!
//! ```rust,no_run
//! use treecopy_engine::Replicator;
//! use std::path::Path;
//!
//! # fn example() -> treecopy_types::Result<()> {
//! let stats = Replicator::new().replicate(Path::new("project"), Path::new("/backups"))?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::path::Path;
use treecopy_types::{CopyStats, Result};

pub mod replicator;
pub mod rollback;
pub mod session;

pub use replicator::{DestinationRoot, ReplicationOptions, Replicator};
pub use rollback::RollbackGuard;
pub use session::{ReplicationSession, WorkItem};

/// Replicate `source` under `destination_parent` with default options on the
/// real filesystem
pub fn replicate<S, D>(source: S, destination_parent: D) -> Result<CopyStats>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    Replicator::new().replicate(source.as_ref(), destination_parent.as_ref())
}
