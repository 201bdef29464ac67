//! Core type system and error handling for treecopy
//!
//! This crate provides the foundational types shared by every treecopy crate:
//!
//! - **Error handling**: one [`Error`] enum with kinds and recoverability hints
//! - **Core types**: copy statistics and directory listings
//! - **Traits**: the [`FileSystem`] seam the replication engine is written against
//! - **Configuration**: validated newtypes such as [`LongPathThreshold`]
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use treecopy_types::{CopyStats, Error, ErrorKind, Result};
//!
//! fn example_operation(ok: bool) -> Result<CopyStats> {
//!     if !ok {
//!         return Err(Error::invalid_argument("source directory does not exist"));
//!     }
//!     let mut stats = CopyStats::new();
//!     stats.files_copied = 10;
//!     Ok(stats)
//! }
//!
//! assert_eq!(example_operation(false).unwrap_err().kind(), ErrorKind::InvalidArgument);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::LongPathThreshold;
pub use error::{Error, ErrorKind, RollbackFailure};
pub use result::Result;
pub use traits::FileSystem;
pub use types::{CopyStats, DirListing};
