//! Buffered file writer

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::trace;

/// Synchronous buffered writer for a file that must not exist yet
#[derive(Debug)]
pub struct FileWriter {
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl FileWriter {
    /// Create a new file for writing.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] if `path` exists.
    pub fn create_new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().write(true).create_new(true).open(path)?;

        trace!("Created file for writing: {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            bytes_written: 0,
        })
    }

    /// Write all data from a byte slice
    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Flush buffered data and hand the file back for syncing or dropping
    pub fn finish(self) -> io::Result<File> {
        self.writer.into_inner().map_err(io::IntoInnerError::into_error)
    }

    /// Get the number of bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_file_writer() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let test_data = b"Hello, World! This is a test file.";

        let mut writer = FileWriter::create_new(&file_path).unwrap();
        assert_eq!(writer.bytes_written(), 0);

        writer.write_all(test_data).unwrap();
        assert_eq!(writer.bytes_written(), test_data.len() as u64);
        writer.finish().unwrap();

        let written_data = std::fs::read(&file_path).unwrap();
        assert_eq!(written_data, test_data);
    }

    #[test]
    fn test_create_new_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("exists.txt");
        std::fs::write(&file_path, b"keep me").unwrap();

        let error = FileWriter::create_new(&file_path).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&file_path).unwrap(), b"keep me");
    }
}
