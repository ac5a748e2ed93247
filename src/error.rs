//! Canonical error and result types for the crate.
//!
//! Absence is never an error in `presence`: missing keys surface as `None` or
//! a default value and early end-of-stream surfaces as a short buffer. The
//! variants here cover genuine transport failures, records that cannot be
//! assembled from a truncated stream, and rejected configuration.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type exposed by `presence`.
#[derive(Debug, Error)]
pub enum PresenceError {
    /// An error in the underlying stream other than end-of-stream.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a record field could be read in full.
    #[error("stream ended inside {field}: have {have} bytes, need {need}")]
    Truncated {
        /// Name of the record field being read.
        field: &'static str,
        /// Bytes received before the stream ended.
        have: usize,
        /// Bytes the field requires.
        need: usize,
    },

    /// A configuration value was rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl PresenceError {
    /// Returns true if this error was caused by the stream ending early.
    #[must_use]
    pub fn is_truncated(&self) -> bool { matches!(self, Self::Truncated { .. }) }
}

/// Canonical result alias used by `presence` public APIs.
pub type Result<T> = std::result::Result<T, PresenceError>;
