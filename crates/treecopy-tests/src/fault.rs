//! A filesystem that fails on request
//!
//! [`FaultyFileSystem`] forwards to [`StdFileSystem`] but returns an error for
//! a chosen file copy, directory creation or for the rollback delete.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use treecopy_io::StdFileSystem;
use treecopy_types::{DirListing, FileSystem};

/// Wraps the real filesystem and injects failures by entry name
#[derive(Debug, Default)]
pub struct FaultyFileSystem {
    inner: StdFileSystem,
    fail_copy: Option<OsString>,
    fail_create: Option<OsString>,
    fail_remove: bool,
    copies_attempted: AtomicUsize,
}

impl FaultyFileSystem {
    /// No faults yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail copying the file called `name`, after writing a few bytes of it
    pub fn fail_copy_of<S: AsRef<OsStr>>(mut self, name: S) -> Self {
        self.fail_copy = Some(name.as_ref().to_os_string());
        self
    }

    /// Fail creating the directory called `name`
    pub fn fail_create_of<S: AsRef<OsStr>>(mut self, name: S) -> Self {
        self.fail_create = Some(name.as_ref().to_os_string());
        self
    }

    /// Fail every recursive delete without removing anything
    pub fn fail_remove(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    /// File copies started so far, including the failing one
    pub fn copies_attempted(&self) -> usize {
        self.copies_attempted.load(Ordering::SeqCst)
    }

    fn matches(target: Option<&OsString>, path: &Path) -> bool {
        target.is_some_and(|name| path.file_name() == Some(name.as_os_str()))
    }
}

impl FileSystem for FaultyFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        if Self::matches(self.fail_create.as_ref(), path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated permission denied",
            ));
        }
        self.inner.create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated locked directory",
            ));
        }
        self.inner.remove_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
        self.inner.list_dir(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.copies_attempted.fetch_add(1, Ordering::SeqCst);
        if Self::matches(self.fail_copy.as_ref(), from) {
            // Leave a truncated file behind, as a full disk would
            fs::write(to, b"par")?;
            return Err(io::Error::new(io::ErrorKind::Other, "simulated disk full"));
        }
        self.inner.copy_file(from, to)
    }
}
