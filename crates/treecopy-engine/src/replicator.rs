//! Replication entry point: argument checks, destination root, rollback

use crate::rollback::RollbackGuard;
use crate::session::{ReplicationSession, WorkItem};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use treecopy_config::Config;
use treecopy_io::{apply_long_path_prefix, is_valid_absolute_path, Platform, StdFileSystem};
use treecopy_types::{CopyStats, Error, FileSystem, LongPathThreshold, Result};

/// Knobs for path handling during replication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicationOptions {
    /// Apply the extended-length prefix to long destination roots on
    /// platforms with a short maximum path
    pub long_path_prefix: bool,
    /// Length at which the prefix is applied
    pub long_path_threshold: LongPathThreshold,
}

impl ReplicationOptions {
    /// Take the replication section of a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            long_path_prefix: config.replication.long_path_prefix,
            long_path_threshold: config.replication.long_path_threshold,
        }
    }
}

impl Default for ReplicationOptions {
    fn default() -> Self {
        Self {
            long_path_prefix: true,
            long_path_threshold: LongPathThreshold::default(),
        }
    }
}

/// Where a replication writes its tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRoot {
    /// Canonical parent joined with the source name; used for comparisons
    pub path: PathBuf,
    /// `path`, escaped for long paths when needed; used for filesystem calls
    pub io_path: PathBuf,
}

/// Copies whole directory trees, removing the partial copy on failure
#[derive(Debug, Clone)]
pub struct Replicator<F = StdFileSystem> {
    options: ReplicationOptions,
    file_system: F,
    platform: Platform,
}

impl Replicator<StdFileSystem> {
    /// Replicator over the real filesystem with default options
    pub fn new() -> Self {
        Self {
            options: ReplicationOptions::default(),
            file_system: StdFileSystem::new(),
            platform: Platform::current(),
        }
    }
}

impl Default for Replicator<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Replicator<F> {
    /// Replace the options
    pub fn with_options(mut self, options: ReplicationOptions) -> Self {
        self.options = options;
        self
    }

    /// Run against another filesystem implementation
    pub fn with_file_system<G: FileSystem>(self, file_system: G) -> Replicator<G> {
        Replicator {
            options: self.options,
            file_system,
            platform: self.platform,
        }
    }

    /// Apply the path rules of `platform` instead of the host's
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Current options
    pub fn options(&self) -> &ReplicationOptions {
        &self.options
    }

    /// Filesystem in use
    pub fn file_system(&self) -> &F {
        &self.file_system
    }

    /// Copy the directory `source` to `destination_parent/<source name>`.
    ///
    /// The destination must not exist yet. If anything fails after it has
    /// been created, it is removed again and the original error is returned;
    /// a failed removal is attached to that error
    /// (see [`Error::rollback_failure`]).
    ///
    /// An empty path stands for a missing argument.
    pub fn replicate(&self, source: &Path, destination_parent: &Path) -> Result<CopyStats> {
        let start = Instant::now();

        if source.as_os_str().is_empty() {
            return Err(Error::invalid_argument("source directory must be provided"));
        }
        if destination_parent.as_os_str().is_empty() {
            return Err(Error::invalid_argument(
                "destination directory must be provided",
            ));
        }
        if !is_valid_absolute_path(destination_parent) {
            return Err(Error::invalid_argument(
                "path contains invalid characters or is not absolute",
            ));
        }
        if !self.file_system.is_dir(source) {
            return Err(Error::invalid_argument("source directory does not exist"));
        }
        let parent = self
            .file_system
            .canonicalize(destination_parent)
            .ok()
            .filter(|parent| self.file_system.is_dir(parent))
            .ok_or_else(|| Error::invalid_argument("destination directory does not exist"))?;

        let canonical_source = self.file_system.canonicalize(source).map_err(|e| {
            Error::io(format!("failed to resolve directory `{}`", source.display()), e)
        })?;
        let name = source
            .file_name()
            .or_else(|| canonical_source.file_name())
            .ok_or_else(|| Error::invalid_argument("source directory has no name"))?;

        let root = self.resolve_destination_root(&parent, name);
        if root.path.starts_with(&canonical_source) {
            return Err(Error::invalid_argument(
                "destination directory lies inside the source directory",
            ));
        }

        debug!(
            "Replicating {} into {}",
            source.display(),
            root.io_path.display()
        );

        self.file_system.create_dir(&root.io_path).map_err(|e| {
            Error::io(
                format!(
                    "failed to create directory `{}` under `{}`",
                    name.to_string_lossy(),
                    parent.display()
                ),
                e,
            )
        })?;
        let guard = RollbackGuard::new(&self.file_system, root.io_path.clone());

        let mut session = ReplicationSession::new(&self.file_system);
        session.push(WorkItem::new(source.to_path_buf(), root.io_path));

        match session.run() {
            Ok(mut stats) => {
                guard.commit();
                stats.directories_created += 1;
                stats.duration = start.elapsed();
                info!(
                    "Replicated {} ({} directories, {} files, {} bytes) in {:?}",
                    source.display(),
                    stats.directories_created,
                    stats.files_copied,
                    stats.bytes_copied,
                    stats.duration
                );
                Ok(stats)
            }
            Err(error) => Err(guard.rollback(error)),
        }
    }

    /// Join `canonical_parent` and `name`, escaping the result for I/O when
    /// the platform needs it. Pure path arithmetic.
    pub fn resolve_destination_root(&self, canonical_parent: &Path, name: &OsStr) -> DestinationRoot {
        let path = canonical_parent.join(name);
        let io_path = if self.options.long_path_prefix {
            apply_long_path_prefix(&path, self.platform, self.options.long_path_threshold.get())
        } else {
            path.clone()
        };

        DestinationRoot { path, io_path }
    }
}
