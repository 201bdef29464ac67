//! Configuration management for treecopy
//!
//! Settings are layered from built-in defaults, an optional YAML/TOML/JSON
//! file and `TREECOPY__*` environment variables, then validated.
//!
//! # Examples
//!
//! ```rust
//! use treecopy_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_source_file("treecopy.yaml")
//!     .add_env_prefix("TREECOPY")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! println!("Long path threshold: {}", config.replication.long_path_threshold.get());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use treecopy_types::LongPathThreshold;

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "TREECOPY";

/// Main configuration structure for treecopy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Replication behavior
    #[serde(default)]
    pub replication: ReplicationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Replication behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationConfig {
    /// Escape long destination paths with the extended-length prefix on
    /// platforms with a short maximum path
    #[serde(default = "default_long_path_prefix")]
    pub long_path_prefix: bool,
    /// Destination path length at which the prefix is applied
    #[serde(default)]
    pub long_path_threshold: LongPathThreshold,
    /// Fingerprint the source before and after a copy and warn if it moved
    #[serde(default = "default_verify_source_unchanged")]
    pub verify_source_unchanged: bool,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            long_path_prefix: default_long_path_prefix(),
            long_path_threshold: LongPathThreshold::default(),
            verify_source_unchanged: default_verify_source_unchanged(),
        }
    }
}

fn default_long_path_prefix() -> bool {
    true
}

fn default_verify_source_unchanged() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Enable JSON formatting
    pub json_format: bool,
    /// Enable colored output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            colored_output: true,
        }
    }
}
