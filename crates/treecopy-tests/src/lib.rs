//! treecopy testing suite
//!
//! Shared helpers for the integration tests and benchmarks: tree builders and
//! comparison in [`test_utils`], and a failure-injecting filesystem in
//! [`fault`].

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Failure injection for the replication engine
pub mod fault;

/// Unified test utilities
///
/// This module provides common utilities used across all test files
/// to ensure consistency and reduce code duplication.
pub mod test_utils;
