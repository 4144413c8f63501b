//! Error types for planediff-core
//!
//! Provides a unified error type for layout construction, compatibility
//! checks and sample-format dispatch. Every variant is fatal for the image
//! pair currently being processed; nothing here is transient.

use thiserror::Error;

/// planediff-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid component dimensions
    #[error("invalid component dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Bit depth outside 1..=64
    #[error("invalid bit depth: {0} bits")]
    InvalidDepth(u8),

    /// Subsampling factors must be positive
    #[error("invalid subsampling factors: {sub_x}x{sub_y}")]
    InvalidSubsampling { sub_x: u8, sub_y: u8 },

    /// Pixel or row pitch too small for the component
    #[error("invalid pitch: {bytes_per_pixel} bytes/pixel, {bytes_per_row} bytes/row for width {width}")]
    InvalidPitch {
        bytes_per_pixel: usize,
        bytes_per_row: usize,
        width: u32,
    },

    /// Buffer shorter than `bytes_per_row * height`
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Component index out of range
    #[error("component index out of bounds: {index} >= {len}")]
    ComponentOutOfBounds { index: usize, len: usize },

    /// The two layouts have a different number of components
    #[error("incompatible images: {0} components vs {1} components")]
    ComponentCountMismatch(usize, usize),

    /// A component pair differs in size
    #[error("incompatible images: component {component} is {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ComponentSizeMismatch {
        component: usize,
        left: (u32, u32),
        right: (u32, u32),
    },

    /// A component pair differs in subsampling
    #[error("incompatible images: component {component} subsampled {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    SubsamplingMismatch {
        component: usize,
        left: (u8, u8),
        right: (u8, u8),
    },

    /// Sample representation outside the supported storage classes
    #[error("unsupported data type: {bits} bits, signed={signed}, float={float}")]
    UnsupportedFormat { bits: u8, signed: bool, float: bool },

    /// Memory allocation failed
    #[error("memory allocation failed for {0} bytes")]
    AllocationFailed(usize),
}

impl Error {
    /// Whether this error reports a shape/subsampling mismatch between
    /// two layouts that are required to correspond.
    pub fn is_compatibility(&self) -> bool {
        matches!(
            self,
            Error::ComponentCountMismatch(..)
                | Error::ComponentSizeMismatch { .. }
                | Error::SubsamplingMismatch { .. }
        )
    }
}

/// Result type alias for planediff-core operations
pub type Result<T> = std::result::Result<T, Error>;
