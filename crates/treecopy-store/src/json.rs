//! Single-object JSON persistence

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use treecopy_io::is_valid_absolute_path;
use treecopy_types::{Error, Result};

const INVALID_PATH: &str = "path contains invalid characters or is not absolute";

/// Serialize `value` as JSON and write it to `absolute_path`, replacing any
/// existing file
pub fn save_json<T, P>(value: &T, absolute_path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = absolute_path.as_ref();
    if !is_valid_absolute_path(path) {
        return Err(Error::invalid_argument(INVALID_PATH));
    }

    let json = serde_json::to_string(value).map_err(|e| Error::serialization(e.to_string()))?;

    std::fs::write(path, json).map_err(|e| {
        Error::io(
            format!("failed to save object to file `{}`", path.display()),
            e,
        )
    })?;

    debug!("Saved JSON object to {}", path.display());
    Ok(())
}

/// Read `absolute_path` and deserialize its JSON content as `T`.
///
/// Content that does not match `T` is reported as
/// [`ErrorKind::InvalidArgument`](treecopy_types::ErrorKind::InvalidArgument).
pub fn read_json<T, P>(absolute_path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = absolute_path.as_ref();
    if !is_valid_absolute_path(path) {
        return Err(Error::invalid_argument(INVALID_PATH));
    }

    let json = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read file `{}`", path.display()), e))?;

    serde_json::from_str(&json).map_err(|e| {
        Error::invalid_argument(format!(
            "the requested type does not match the file content: {}",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;
    use treecopy_types::ErrorKind;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        name: String,
        files: Vec<String>,
    }

    fn sample() -> Snapshot {
        Snapshot {
            name: "repo".to_string(),
            files: vec!["a.txt".to_string(), "sub/b.txt".to_string()],
        }
    }

    #[test]
    fn test_save_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");

        save_json(&sample(), &path).unwrap();
        let loaded: Snapshot = read_json(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("value.json");

        save_json(&1u32, &path).unwrap();
        save_json(&2u32, &path).unwrap();

        assert_eq!(read_json::<u32, _>(&path).unwrap(), 2);
    }

    #[test]
    fn test_relative_path_rejected() {
        let error = save_json(&sample(), "relative/snapshot.json").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);

        let error = read_json::<Snapshot, _>("relative/snapshot.json").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let error = read_json::<Snapshot, _>(temp_dir.path().join("missing.json")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("missing.json"));
    }

    #[test]
    fn test_type_mismatch_is_invalid_argument() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("number.json");
        save_json(&42u32, &path).unwrap();

        let error = read_json::<Snapshot, _>(&path).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert!(error.to_string().contains("does not match"));
    }

    #[test]
    fn test_write_into_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("x.json");

        let error = save_json(&sample(), &path).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
