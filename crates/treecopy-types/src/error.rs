//! Error types and handling for treecopy
//!
//! Every fallible operation in the workspace reports one [`Error`]. The two
//! kinds the replication engine itself produces are
//! [`ErrorKind::InvalidArgument`] (bad or missing input, rejected before any
//! filesystem mutation) and [`ErrorKind::Io`] (a filesystem operation failed
//! mid-copy; the original `std::io::Error` is always kept as the source).

use std::fmt;
use std::path::PathBuf;

/// Failure of the clean-up that follows an aborted replication.
///
/// Carried alongside the original I/O error, never instead of it.
#[derive(Debug)]
pub struct RollbackFailure {
    /// Destination root that could not be removed
    pub path: PathBuf,
    /// Error reported by the recursive delete
    pub error: std::io::Error,
}

impl fmt::Display for RollbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to remove partially replicated tree '{}': {}",
            self.path.display(),
            self.error
        )
    }
}

/// Main error type for treecopy operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed or missing input
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected input
        message: String,
    },

    /// A filesystem operation failed
    #[error("I/O error: {message}")]
    Io {
        /// What the engine was doing when the operation failed
        message: String,
        /// Underlying I/O error
        source: std::io::Error,
        /// Set when the rollback that followed this error also failed
        rollback: Option<RollbackFailure>,
    },

    /// Operation called on an object that is not ready for it
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message describing the state violation
        message: String,
    },

    /// Serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message from the serializer
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Malformed or missing input
    InvalidArgument,
    /// Filesystem failures
    Io,
    /// Object used out of order
    InvalidState,
    /// Serialization failures
    Serialization,
    /// Configuration errors
    Config,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Check if retrying the same call could succeed without changing inputs.
    ///
    /// Only transient I/O conditions qualify. The engine never retries on its
    /// own; this is a hint for callers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),
            Self::InvalidArgument { .. }
            | Self::InvalidState { .. }
            | Self::Serialization { .. }
            | Self::Config { .. } => false,
        }
    }

    /// Rollback failure attached to an I/O error, if any
    pub fn rollback_failure(&self) -> Option<&RollbackFailure> {
        match self {
            Self::Io { rollback, .. } => rollback.as_ref(),
            _ => None,
        }
    }

    /// Attach a rollback failure to this error.
    ///
    /// Errors that are not [`Error::Io`] are returned unchanged.
    pub fn with_rollback_failure(self, failure: RollbackFailure) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                source,
                rollback: Some(failure),
            },
            other => other,
        }
    }

    /// Create a new invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new I/O error wrapping `source`
    pub fn io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
            rollback: None,
        }
    }

    /// Create a new invalid-state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string(), error)
    }
}
