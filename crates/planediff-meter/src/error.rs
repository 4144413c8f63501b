//! Error types for planediff-meter

use thiserror::Error;

/// Errors that can occur while measuring an image pair
#[derive(Debug, Error)]
pub enum MeterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] planediff_core::Error),

    /// Transform error
    #[error("transform error: {0}")]
    Transform(#[from] planediff_transform::TransformError),

    /// Invalid pipeline sequence string
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// A pipeline stage failed
    #[error("stage {index} ({stage}) failed: {source}")]
    Stage {
        index: usize,
        stage: String,
        source: Box<MeterError>,
    },
}

impl MeterError {
    /// The innermost error, looking through [`MeterError::Stage`] wrappers.
    pub fn root(&self) -> &MeterError {
        match self {
            MeterError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for measurements
pub type MeterResult<T> = Result<T, MeterError>;
