//! Filesystem primitives and path handling for treecopy
//!
//! This crate provides the blocking filesystem layer the replication engine
//! runs on:
//!
//! - **StdFileSystem**: the [`FileSystem`](treecopy_types::FileSystem) seam
//!   implemented over `std::fs`
//! - **Byte copy**: buffered whole-file copy that never overwrites
//! - **Path rules**: absolute-path validation, platform detection and the
//!   Windows extended-length-path escape
//!
//! # Examples
//!
//! ```rust
//! use treecopy_io::{apply_long_path_prefix, Platform};
//! use std::path::Path;
//!
//! let deep = format!(r"C:\{}", "a".repeat(250));
//! let prefixed = apply_long_path_prefix(Path::new(&deep), Platform::Windows, 200);
//! assert!(prefixed.to_string_lossy().starts_with(r"\\?\"));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod copy;
pub mod fs;
pub mod path;
pub mod reader;
pub mod writer;

pub use copy::{copy_file_contents, COPY_BUFFER_SIZE};
pub use fs::StdFileSystem;
pub use path::{
    apply_long_path_prefix, has_invalid_characters, is_valid_absolute_path, path_length, Platform,
    EXTENDED_LENGTH_PREFIX,
};
pub use reader::FileReader;
pub use writer::FileWriter;
