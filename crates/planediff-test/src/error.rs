//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a synthetic layout failed
    #[error("core error: {0}")]
    Core(#[from] planediff_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
