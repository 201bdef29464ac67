//! Single-file creation and revertible repository changes

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;
use treecopy_types::{Error, Result};

/// Create one empty file at `path`.
///
/// Fails if the file already exists or its parent directory is missing.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::io(format!("failed to create file `{}`", path.display()), e))?;

    debug!("Created empty file {}", path.display());
    Ok(())
}

/// A modification applied to a repository directory that can be undone
pub trait Change {
    /// Apply the change inside `repo_directory`
    fn apply(&self, repo_directory: &Path) -> Result<()>;

    /// Undo a previously applied change inside `repo_directory`
    fn revert(&self, repo_directory: &Path) -> Result<()>;
}

/// Adds an empty file at a path relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFileChange {
    relative_path: PathBuf,
}

impl NewFileChange {
    /// Describe a new file at `relative_path`.
    ///
    /// Absolute paths and paths that climb out of the repository are rejected.
    pub fn new<P: AsRef<Path>>(relative_path: P) -> Result<Self> {
        let relative_path = relative_path.as_ref();
        let escapes = relative_path
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir));
        if relative_path.as_os_str().is_empty() || escapes {
            return Err(Error::invalid_argument(format!(
                "`{}` is not a path inside the repository",
                relative_path.display()
            )));
        }

        Ok(Self {
            relative_path: relative_path.to_path_buf(),
        })
    }

    /// Path of the file relative to the repository root
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }
}

impl Change for NewFileChange {
    fn apply(&self, repo_directory: &Path) -> Result<()> {
        create_file(repo_directory.join(&self.relative_path))
    }

    fn revert(&self, repo_directory: &Path) -> Result<()> {
        let path = repo_directory.join(&self.relative_path);
        std::fs::remove_file(&path)
            .map_err(|e| Error::io(format!("failed to remove file `{}`", path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;
    use treecopy_types::ErrorKind;

    #[test]
    fn test_create_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.txt");

        create_file(&path).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_create_file_refuses_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taken.txt");
        std::fs::write(&path, b"content").unwrap();

        let error = create_file(&path).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
        assert_eq!(std::fs::read(&path).unwrap(), b"content");
    }

    #[test]
    fn test_apply_and_revert() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("docs")).unwrap();
        let change = NewFileChange::new("docs/readme.md").unwrap();

        change.apply(temp_dir.path()).unwrap();
        assert!(temp_dir.path().join("docs/readme.md").is_file());

        change.revert(temp_dir.path()).unwrap();
        assert!(!temp_dir.path().join("docs/readme.md").exists());
    }

    #[rstest]
    #[case("")]
    #[case("../outside.txt")]
    #[case("a/../../b.txt")]
    #[cfg_attr(unix, case("/etc/passwd"))]
    fn test_rejects_paths_outside_repository(#[case] path: &str) {
        let error = NewFileChange::new(path).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }
}
