//! Buffered file reader

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Synchronous buffered file reader that tracks progress
#[derive(Debug)]
pub struct FileReader {
    reader: BufReader<File>,
    file_size: u64,
    bytes_read: u64,
}

impl FileReader {
    /// Open a file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        trace!("Opened file for reading: {} ({} bytes)", path.display(), file_size);

        Ok(Self {
            reader: BufReader::new(file),
            file_size,
            bytes_read: 0,
        })
    }

    /// Read data into a buffer, returning 0 at end of file
    pub fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes_read = loop {
            match self.reader.read(buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        self.bytes_read += bytes_read as u64;
        Ok(bytes_read)
    }

    /// Size of the file when it was opened
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get the number of bytes read so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, b"Hello, World!").unwrap();

        let mut reader = FileReader::open(&file_path).unwrap();
        assert_eq!(reader.file_size(), 13);

        let mut buf = [0u8; 5];
        let mut collected = Vec::new();
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            collected.extend_from_slice(&buf[..n]);
        }

        assert_eq!(collected, b"Hello, World!");
        assert_eq!(reader.bytes_read(), 13);
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let error = FileReader::open(temp_dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
