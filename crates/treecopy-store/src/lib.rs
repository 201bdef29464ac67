//! Storage collaborators for treecopy
//!
//! Small, stateless helpers used around the replication engine:
//!
//! - [`save_json`] / [`read_json`]: persist one serde value per file
//! - [`ChangeTracker`] / [`TreeFingerprint`]: SHA-256 "has this changed since
//!   the last snapshot" checks
//! - [`create_file`] / [`NewFileChange`]: single empty-file creation as a
//!   revertible [`Change`]

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod change;
pub mod json;
pub mod snapshot;

pub use change::{create_file, Change, NewFileChange};
pub use json::{read_json, save_json};
pub use snapshot::{compute_hash, ChangeTracker, Fingerprint, TreeFingerprint};
