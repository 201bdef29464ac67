//! Core data types for treecopy

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Statistics of one successful replication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CopyStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of directories created, including the destination root
    pub directories_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Total duration of the operation
    pub duration: Duration,
}

impl CopyStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the overall transfer rate in bytes per second
    pub fn transfer_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.bytes_copied as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Merge statistics from another instance
    pub fn merge(&mut self, other: &CopyStats) {
        self.files_copied += other.files_copied;
        self.directories_created += other.directories_created;
        self.bytes_copied += other.bytes_copied;
        self.duration += other.duration;
    }
}

/// Immediate children of one directory, split by kind.
///
/// Entries are full paths (the listed directory joined with the entry name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Subdirectories
    pub directories: Vec<PathBuf>,
    /// Regular files
    pub files: Vec<PathBuf>,
}

impl DirListing {
    /// True when the directory has neither files nor subdirectories
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}
