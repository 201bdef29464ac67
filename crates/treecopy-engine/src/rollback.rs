//! Scoped removal of a partially replicated tree

use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use treecopy_types::{Error, FileSystem, RollbackFailure};

/// Deletes the destination root unless the replication commits.
///
/// Arm it right after the root directory is created. On success call
/// [`commit`](Self::commit); on an error call [`rollback`](Self::rollback),
/// which reports a failed delete alongside the original error. If the guard
/// is dropped while still armed (a panic unwound through the traversal) it
/// removes the tree on a best-effort basis.
#[must_use = "dropping an armed guard deletes the destination tree"]
pub struct RollbackGuard<'a, F: FileSystem + ?Sized> {
    file_system: &'a F,
    root: PathBuf,
    armed: bool,
}

impl<'a, F: FileSystem + ?Sized> RollbackGuard<'a, F> {
    /// Arm a guard over `root`
    pub fn new(file_system: &'a F, root: PathBuf) -> Self {
        Self {
            file_system,
            root,
            armed: true,
        }
    }

    /// Tree that will be removed on rollback
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keep the tree
    pub fn commit(mut self) {
        self.armed = false;
    }

    /// Remove the tree and return `error`, carrying the delete failure if
    /// there was one
    pub fn rollback(mut self, error: Error) -> Error {
        self.armed = false;
        warn!(
            "Replication failed, removing {}: {}",
            self.root.display(),
            error
        );

        match self.file_system.remove_dir_all(&self.root) {
            Ok(()) => {
                debug!("Rolled back {}", self.root.display());
                error
            }
            Err(e) => {
                warn!("Rollback of {} failed: {}", self.root.display(), e);
                error.with_rollback_failure(RollbackFailure {
                    path: self.root.clone(),
                    error: e,
                })
            }
        }
    }
}

impl<F: FileSystem + ?Sized> Drop for RollbackGuard<'_, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        warn!(
            "Replication aborted before completion, removing {}",
            self.root.display()
        );
        if let Err(e) = self.file_system.remove_dir_all(&self.root) {
            error!("Failed to remove {}: {}", self.root.display(), e);
        }
    }
}
