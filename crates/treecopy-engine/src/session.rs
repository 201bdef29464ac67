//! Iterative traversal state for one replication call

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::trace;
use treecopy_types::{CopyStats, Error, FileSystem, Result};

/// Canonical path of an expanded directory, linked to its parent's entry.
///
/// Siblings share the chain of their common ancestors.
#[derive(Debug, PartialEq, Eq)]
struct Ancestor {
    canonical: PathBuf,
    parent: Option<Rc<Ancestor>>,
}

fn is_ancestor(chain: Option<&Rc<Ancestor>>, canonical: &Path) -> bool {
    let mut current = chain;
    while let Some(ancestor) = current {
        if ancestor.canonical == canonical {
            return true;
        }
        current = ancestor.parent.as_ref();
    }
    false
}

/// A source directory waiting to be expanded, paired with the destination
/// directory that already mirrors it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Directory in the source tree
    pub source: PathBuf,
    /// Existing mirror of `source` in the destination tree
    pub destination: PathBuf,
    ancestors: Option<Rc<Ancestor>>,
}

impl WorkItem {
    /// Pair a source directory with its mirror
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
            ancestors: None,
        }
    }
}

/// Owns the pending work of a single replication.
///
/// Every directory on the stack already has its mirror created, so expanding
/// an item only creates the mirrors of its children. The session is consumed
/// by [`run`](Self::run); whatever is left on the stack after a failure is
/// dropped with it.
///
/// A directory is a cycle only when its canonical path is one of its own
/// ancestors. The same directory reached through two links is copied twice.
pub struct ReplicationSession<'a, F: FileSystem + ?Sized> {
    file_system: &'a F,
    pending: Vec<WorkItem>,
    stats: CopyStats,
}

impl<'a, F: FileSystem + ?Sized> ReplicationSession<'a, F> {
    /// Start an empty session
    pub fn new(file_system: &'a F) -> Self {
        Self {
            file_system,
            pending: Vec::new(),
            stats: CopyStats::new(),
        }
    }

    /// Queue a directory whose mirror has already been created
    pub fn push(&mut self, item: WorkItem) {
        self.pending.push(item);
    }

    /// Number of directories waiting to be expanded
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drain the stack, stopping at the first failure.
    ///
    /// Returned statistics count only what this session created; the caller
    /// accounts for the seeded root.
    pub fn run(mut self) -> Result<CopyStats> {
        while let Some(item) = self.pending.pop() {
            self.expand(item)?;
        }
        Ok(self.stats)
    }

    fn expand(&mut self, item: WorkItem) -> Result<()> {
        let WorkItem {
            source,
            destination,
            ancestors,
        } = item;

        let canonical = self.file_system.canonicalize(&source).map_err(|e| {
            Error::io(format!("failed to resolve directory `{}`", source.display()), e)
        })?;
        if is_ancestor(ancestors.as_ref(), &canonical) {
            return Err(Error::io(
                format!("directory cycle detected at `{}`", source.display()),
                io::Error::new(io::ErrorKind::Other, "directory contains itself"),
            ));
        }
        let lineage = Rc::new(Ancestor {
            canonical,
            parent: ancestors,
        });

        let listing = self.file_system.list_dir(&source).map_err(|e| {
            Error::io(format!("failed to list directory `{}`", source.display()), e)
        })?;
        trace!(
            "Expanding {} ({} directories, {} files)",
            source.display(),
            listing.directories.len(),
            listing.files.len()
        );

        for directory in listing.directories {
            let Some(name) = directory.file_name() else {
                continue;
            };
            let mirror = destination.join(name);
            self.file_system.create_dir(&mirror).map_err(|e| {
                Error::io(
                    format!(
                        "failed to create directory `{}` under `{}`",
                        name.to_string_lossy(),
                        destination.display()
                    ),
                    e,
                )
            })?;
            self.stats.directories_created += 1;
            self.pending.push(WorkItem {
                source: directory,
                destination: mirror,
                ancestors: Some(Rc::clone(&lineage)),
            });
        }

        for file in listing.files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let bytes = self
                .file_system
                .copy_file(&file, &destination.join(name))
                .map_err(|e| {
                    Error::io(
                        format!(
                            "failed to copy file `{}` to `{}`",
                            name.to_string_lossy(),
                            destination.display()
                        ),
                        e,
                    )
                })?;
            self.stats.files_copied += 1;
            self.stats.bytes_copied += bytes;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use treecopy_io::StdFileSystem;
    use treecopy_types::ErrorKind;

    #[test]
    fn test_run_mirrors_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        fs::create_dir_all(source.join("a/b/c")).unwrap();
        fs::write(source.join("a/one.txt"), b"1").unwrap();
        fs::write(source.join("a/b/c/three.txt"), b"333").unwrap();
        fs::create_dir(&destination).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source, destination.clone()));
        assert_eq!(session.pending(), 1);

        let stats = session.run().unwrap();

        assert_eq!(stats.directories_created, 3);
        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.bytes_copied, 4);
        assert_eq!(fs::read(destination.join("a/b/c/three.txt")).unwrap(), b"333");
    }

    #[test]
    fn test_existing_child_mirror_fails_with_directory_name() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::create_dir_all(destination.join("sub")).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source, destination));

        let error = session.run().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error
            .to_string()
            .contains("failed to create directory `sub` under"));
    }

    #[test]
    fn test_same_directory_queued_twice_is_copied_twice() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("f.txt"), b"shared").unwrap();
        fs::create_dir(temp_dir.path().join("d1")).unwrap();
        fs::create_dir(temp_dir.path().join("d2")).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source.clone(), temp_dir.path().join("d1")));
        session.push(WorkItem::new(source, temp_dir.path().join("d2")));

        let stats = session.run().unwrap();

        assert_eq!(stats.files_copied, 2);
        assert_eq!(fs::read(temp_dir.path().join("d1/f.txt")).unwrap(), b"shared");
        assert_eq!(fs::read(temp_dir.path().join("d2/f.txt")).unwrap(), b"shared");
    }

    #[test]
    fn test_ancestor_chain_lookup() {
        let root = Rc::new(Ancestor {
            canonical: PathBuf::from("/r"),
            parent: None,
        });
        let child = Rc::new(Ancestor {
            canonical: PathBuf::from("/r/a"),
            parent: Some(Rc::clone(&root)),
        });

        assert!(is_ancestor(Some(&child), Path::new("/r")));
        assert!(is_ancestor(Some(&child), Path::new("/r/a")));
        assert!(!is_ancestor(Some(&root), Path::new("/r/a")));
        assert!(!is_ancestor(None, Path::new("/r")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_terminates() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&destination).unwrap();
        std::os::unix::fs::symlink(&source, source.join("loop")).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source, destination));

        let error = session.run().unwrap_err();
        assert!(error.to_string().contains("directory cycle detected"));
    }

    #[cfg(unix)]
    #[test]
    fn test_sibling_link_is_not_a_cycle() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        fs::create_dir_all(source.join("a")).unwrap();
        fs::write(source.join("a/f.txt"), b"data").unwrap();
        fs::create_dir(&destination).unwrap();
        std::os::unix::fs::symlink(source.join("a"), source.join("b")).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source, destination.clone()));

        let stats = session.run().unwrap();

        assert_eq!(stats.directories_created, 2);
        assert_eq!(fs::read(destination.join("a/f.txt")).unwrap(), b"data");
        assert_eq!(fs::read(destination.join("b/f.txt")).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_loop_below_a_link_is_detected() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        fs::create_dir_all(source.join("a/deep")).unwrap();
        fs::create_dir(&destination).unwrap();
        std::os::unix::fs::symlink(source.join("a"), source.join("a/deep/up")).unwrap();

        let fs_impl = StdFileSystem::new();
        let mut session = ReplicationSession::new(&fs_impl);
        session.push(WorkItem::new(source, destination));

        let error = session.run().unwrap_err();
        assert!(error.to_string().contains("directory cycle detected"));
        assert!(error.to_string().contains("up"));
    }
}
