//! Error types for record formatting operations.
//!
//! This module provides the [`FormatError`] type for all formatting and
//! export operations and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all formatting library operations.
///
/// Represents the error conditions that can occur while highlighting text,
/// extracting snippets, or exporting records to XML.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A caller-supplied argument is outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The keyword list could not be compiled into a match pattern.
    #[error("Invalid highlight pattern: {0}")]
    InvalidPattern(String),

    /// A malformed field tag selector.
    #[error("Invalid tag selector: {0}")]
    InvalidTagSpec(String),

    /// The requested record does not exist in the field store.
    #[error("Record {0} not found")]
    RecordNotFound(u32),

    /// Error reported by the underlying field store.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A cached export blob could not be inflated.
    #[error("Corrupt cached format: {0}")]
    CorruptCache(String),
}

/// Convenience type alias for [`std::result::Result`] with [`FormatError`].
pub type Result<T> = std::result::Result<T, FormatError>;
