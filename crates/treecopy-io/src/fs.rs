//! [`FileSystem`] implementation backed by `std::fs`

use crate::copy::copy_file_contents;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use treecopy_types::{DirListing, FileSystem};

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a handle to the real filesystem
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)?;
        trace!("Created directory {}", path.display());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)?;
        debug!("Removed directory tree {}", path.display());
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
        let mut listing = DirListing::default();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();

            // Follow links; a dangling link is listed as a file so that
            // copying it reports the failure instead of silently dropping it.
            match fs::metadata(&entry_path) {
                Ok(meta) if meta.is_dir() => listing.directories.push(entry_path),
                Ok(meta) if meta.is_file() => listing.files.push(entry_path),
                Ok(_) => warn!("Skipping special file {}", entry_path.display()),
                Err(_) => listing.files.push(entry_path),
            }
        }

        listing.directories.sort();
        listing.files.sort();
        Ok(listing)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        copy_file_contents(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_splits_by_kind() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("b_dir")).unwrap();
        fs::create_dir(root.join("a_dir")).unwrap();
        fs::write(root.join("z.txt"), b"z").unwrap();
        fs::write(root.join("y.txt"), b"y").unwrap();

        let listing = StdFileSystem::new().list_dir(root).unwrap();

        assert_eq!(listing.directories, vec![root.join("a_dir"), root.join("b_dir")]);
        assert_eq!(listing.files, vec![root.join("y.txt"), root.join("z.txt")]);
    }

    #[test]
    fn test_create_dir_fails_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("once");
        let fs = StdFileSystem::new();

        fs.create_dir(&dir).unwrap();
        let error = fs.create_dir(&dir).unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_create_dir_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("missing").join("child");

        assert!(StdFileSystem::new().create_dir(&nested).is_err());
        assert!(!temp_dir.path().join("missing").exists());
    }

    #[test]
    fn test_remove_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/c.txt"), b"c").unwrap();

        StdFileSystem::new().remove_dir_all(&root).unwrap();

        assert!(!root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_listed_as_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::os::unix::fs::symlink(root.join("gone"), root.join("link")).unwrap();

        let listing = StdFileSystem::new().list_dir(root).unwrap();

        assert_eq!(listing.files, vec![root.join("link")]);
        assert!(listing.directories.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_socket_is_left_out_of_listing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("plain.txt"), b"p").unwrap();
        let _listener = std::os::unix::net::UnixListener::bind(root.join("sock")).unwrap();

        let listing = StdFileSystem::new().list_dir(root).unwrap();

        assert_eq!(listing.files, vec![root.join("plain.txt")]);
        assert!(listing.directories.is_empty());
    }
}
