//! JSON report written after a copy

use serde::{Deserialize, Serialize};
use std::path::Path;
use treecopy_types::{CopyStats, Error};

/// Complete JSON report of one copy
#[derive(Debug, Serialize, Deserialize)]
pub struct CopyReport {
    /// Operation metadata
    pub metadata: OperationMetadata,
    /// Copy statistics, present when the copy succeeded
    pub copy_stats: Option<CopyStatsJson>,
    /// Overall result
    pub result: OperationResult,
}

/// Operation metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// treecopy version
    pub version: String,
    /// Operation type
    pub operation: String,
    /// Timestamp when the report was produced
    pub timestamp: String,
    /// Source path
    pub source_path: String,
    /// Destination parent path
    pub destination_path: String,
}

/// Copy statistics in JSON format
#[derive(Debug, Serialize, Deserialize)]
pub struct CopyStatsJson {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of directories created
    pub directories_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Transfer rate in MB/s
    pub transfer_rate_mbps: f64,
}

/// Overall operation result
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the copy completed
    pub success: bool,
    /// Result message
    pub message: String,
    /// Whether the partial copy could not be removed after a failure
    pub rollback_failed: bool,
    /// Source fingerprint comparison; `None` when not checked
    pub source_unchanged: Option<bool>,
}

impl CopyReport {
    fn metadata(source: &Path, destination: &Path) -> OperationMetadata {
        OperationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            operation: "copy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            source_path: source.display().to_string(),
            destination_path: destination.display().to_string(),
        }
    }

    /// Report a completed copy
    pub fn success(
        source: &Path,
        destination: &Path,
        stats: &CopyStats,
        source_unchanged: Option<bool>,
    ) -> Self {
        let message = match source_unchanged {
            Some(false) => "Copy completed but the source changed while it was copied".to_string(),
            _ => "Copy completed successfully".to_string(),
        };

        Self {
            metadata: Self::metadata(source, destination),
            copy_stats: Some(CopyStatsJson::from_copy_stats(stats)),
            result: OperationResult {
                success: true,
                message,
                rollback_failed: false,
                source_unchanged,
            },
        }
    }

    /// Report a failed copy
    pub fn failure(source: &Path, destination: &Path, error: &Error) -> Self {
        Self {
            metadata: Self::metadata(source, destination),
            copy_stats: None,
            result: OperationResult {
                success: false,
                message: error.to_string(),
                rollback_failed: error.rollback_failure().is_some(),
                source_unchanged: None,
            },
        }
    }
}

impl CopyStatsJson {
    /// Create CopyStatsJson from CopyStats
    pub fn from_copy_stats(stats: &CopyStats) -> Self {
        Self {
            files_copied: stats.files_copied,
            directories_created: stats.directories_created,
            bytes_copied: stats.bytes_copied,
            duration_seconds: stats.duration.as_secs_f64(),
            transfer_rate_mbps: stats.transfer_rate() / 1024.0 / 1024.0,
        }
    }
}
