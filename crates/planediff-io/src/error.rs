//! I/O error types
//!
//! Errors raised while pulling bytes out of compressed or uncompressed
//! plane storage. A plane reader turns a stream underrun into
//! [`IoError::TruncatedPlane`] so callers can report which row ran dry.

use thiserror::Error;

/// Error type for plane decoding.
#[derive(Error, Debug)]
pub enum IoError {
    /// The input ended while the stream still owed bytes
    #[error("stream underrun at input offset {offset}: {owed} bytes still owed")]
    Underrun { offset: usize, owed: usize },

    /// A plane could not be filled completely
    #[error("corrupt or truncated plane: data ends in row {row} (input offset {offset})")]
    TruncatedPlane { row: u32, offset: usize },

    /// The stored data is structurally invalid
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. unsupported sample format)
    #[error("core error: {0}")]
    Core(#[from] planediff_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
