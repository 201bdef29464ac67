//! Whole-file byte copy

use crate::{FileReader, FileWriter};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Size of the buffer used to move bytes between reader and writer
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Copy the byte content of `source` into a new file at `destination`.
///
/// Only content is copied; permissions and timestamps are left to the
/// platform defaults. The destination must not exist. If the copy fails after
/// the destination was created, the partial file is removed before the error
/// is returned.
pub fn copy_file_contents(source: &Path, destination: &Path) -> io::Result<u64> {
    let mut reader = FileReader::open(source)?;
    let writer = FileWriter::create_new(destination)?;

    match pump(&mut reader, writer) {
        Ok(bytes) => {
            debug!(
                "Copied {} bytes: {} -> {}",
                bytes,
                source.display(),
                destination.display()
            );
            Ok(bytes)
        }
        Err(e) => {
            if let Err(cleanup) = std::fs::remove_file(destination) {
                warn!(
                    "Failed to remove partial file {}: {}",
                    destination.display(),
                    cleanup
                );
            }
            Err(e)
        }
    }
}

fn pump(reader: &mut FileReader, mut writer: FileWriter) -> io::Result<u64> {
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    let bytes_written = writer.bytes_written();
    writer.finish()?;
    Ok(bytes_written)
}
