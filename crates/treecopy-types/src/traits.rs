//! Core traits for treecopy operations
//!
//! The replication engine never calls `std::fs` directly. It goes through
//! [`FileSystem`], which lets tests substitute a filesystem that fails on
//! demand.

use crate::DirListing;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem primitives the replication engine depends on
pub trait FileSystem {
    /// Whether `path` exists and is a directory (symlinks followed)
    fn is_dir(&self, path: &Path) -> bool;

    /// Resolve `path` to an absolute path with all links and `..` removed
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create exactly one directory; fails if it already exists
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything beneath it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the immediate subdirectories and files of `path`
    fn list_dir(&self, path: &Path) -> io::Result<DirListing>;

    /// Copy the byte content of `from` into a new file at `to`.
    ///
    /// Fails if `to` already exists. Returns the number of bytes copied.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
        (**self).list_dir(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        (**self).copy_file(from, to)
    }
}
