//! Error handling types for the Creole parser.
//!
//! This module provides the single error type returned by every fallible
//! public operation.

use thiserror::Error;

/// The error taxonomy exposed by this crate, mirroring the reference
/// implementation's `CreoleError` C enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreoleError {
    /// Reserved for argument validation; the safe Rust API makes the
    /// reference's null-input/negative-length cases unrepresentable, so no
    /// current code path returns this.
    #[error("bad argument: {message}")]
    BadArgument { message: String },

    /// Reserved for parity with the reference; Rust aborts on allocation
    /// failure rather than returning an error, so this is never produced.
    #[error("out of memory")]
    OutOfMemory,

    /// Reserved for a transcoding shell outside this crate's scope; the
    /// core treats all input as opaque UTF-8 bytes.
    #[error("encoding error: {message}")]
    EncodingError { message: String },

    /// Reserved, unused by the core today: it treats all byte sequences as
    /// meaningful and never rejects markup outright.
    #[error("bad input: {message}")]
    BadInput { message: String },

    /// A plugin handler re-entered `parse_plugin_text` past the bounded
    /// recursion cap.
    #[error("plugin recursion depth exceeded limit of {limit}")]
    RecursionLimit { limit: usize },
}

/// Result type for parser operations.
pub type CreoleResult<T> = Result<T, CreoleError>;

impl CreoleError {
    pub(crate) fn recursion_limit(limit: usize) -> Self {
        CreoleError::RecursionLimit { limit }
    }
}
