//! Result type alias for treecopy operations

use crate::Error;

/// Result type alias for treecopy operations
pub type Result<T> = std::result::Result<T, Error>;
