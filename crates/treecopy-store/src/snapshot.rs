//! SHA-256 based change tracking
//!
//! A [`ChangeTracker`] remembers the fingerprint of a value at one point in
//! time and later answers whether the value still has that fingerprint.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::trace;
use treecopy_types::{Error, Result};
use walkdir::WalkDir;

/// Lowercase hex SHA-256 of `value`
pub fn compute_hash(value: &[u8]) -> String {
    format!("{:x}", Sha256::digest(value))
}

/// Something whose identity can be summarized as a hash string
pub trait Fingerprint {
    /// Compute the current identifier of `self`
    fn compute_id(&self) -> Result<String>;
}

impl Fingerprint for str {
    fn compute_id(&self) -> Result<String> {
        Ok(compute_hash(self.as_bytes()))
    }
}

impl Fingerprint for String {
    fn compute_id(&self) -> Result<String> {
        self.as_str().compute_id()
    }
}

impl Fingerprint for [u8] {
    fn compute_id(&self) -> Result<String> {
        Ok(compute_hash(self))
    }
}

impl Fingerprint for Vec<u8> {
    fn compute_id(&self) -> Result<String> {
        self.as_slice().compute_id()
    }
}

/// Wraps a value and the fingerprint it had when last snapshotted
#[derive(Debug, Clone)]
pub struct ChangeTracker<T> {
    value: T,
    current_id: Option<String>,
}

impl<T: Fingerprint> ChangeTracker<T> {
    /// Track `value` without taking a snapshot yet
    pub fn new(value: T) -> Self {
        Self {
            value,
            current_id: None,
        }
    }

    /// Track `value` and snapshot it immediately
    pub fn snapshot(value: T) -> Result<Self> {
        let mut tracker = Self::new(value);
        tracker.set_current_id()?;
        Ok(tracker)
    }

    /// Record the value's present fingerprint as the reference
    pub fn set_current_id(&mut self) -> Result<()> {
        self.current_id = Some(self.value.compute_id()?);
        Ok(())
    }

    /// True when the value still has the fingerprint recorded by the last
    /// [`set_current_id`](Self::set_current_id).
    ///
    /// Fails with [`ErrorKind::InvalidState`](treecopy_types::ErrorKind::InvalidState)
    /// if no snapshot was taken.
    pub fn is_not_changed(&self) -> Result<bool> {
        let current_id = self.current_id.as_deref().ok_or_else(|| {
            Error::invalid_state("set_current_id must be called before checking for changes")
        })?;
        Ok(current_id == self.value.compute_id()?)
    }

    /// Fingerprint recorded by the last snapshot
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Shared access to the tracked value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutable access to the tracked value; the snapshot is kept
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Stop tracking and return the value
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Fingerprint of a whole directory tree: relative paths, entry kinds and
/// file contents, visited in sorted order
#[derive(Debug, Clone)]
pub struct TreeFingerprint {
    root: PathBuf,
}

impl TreeFingerprint {
    /// Fingerprint the tree rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root of the fingerprinted tree
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fingerprint for TreeFingerprint {
    fn compute_id(&self) -> Result<String> {
        let mut hasher = Sha256::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .min_depth(1)
        {
            let entry = entry.map_err(|e| {
                let message = format!("failed to walk `{}`", self.root.display());
                match e.into_io_error() {
                    Some(source) => Error::io(message, source),
                    None => Error::invalid_state(message),
                }
            })?;

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            let components: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();

            if entry.file_type().is_dir() {
                hasher.update(b"d:");
                hasher.update(components.join("/").as_bytes());
                hasher.update([0u8]);
            } else {
                hasher.update(b"f:");
                hasher.update(components.join("/").as_bytes());
                hasher.update([0u8]);

                let mut file = File::open(entry.path()).map_err(|e| {
                    Error::io(format!("failed to read `{}`", entry.path().display()), e)
                })?;
                let bytes = std::io::copy(&mut file, &mut hasher).map_err(|e| {
                    Error::io(format!("failed to read `{}`", entry.path().display()), e)
                })?;
                hasher.update(bytes.to_le_bytes());
            }
        }

        let id = format!("{:x}", hasher.finalize());
        trace!("Fingerprint of {}: {}", self.root.display(), id);
        Ok(id)
    }
}
