//! planediff-transform - Spatial transforms for planar images
//!
//! This crate provides the geometric operations a comparison pipeline can
//! run over an image pair before scoring:
//!
//! - Box-filter downsampling by integer factors ([`Downsampler`])
//! - Bilinear upsampling by integer factors ([`Upsampler`])
//! - Horizontal and vertical mirroring ([`Flip`])
//!
//! All operations work on any sample format the core crate can dispatch
//! and saturate their results into each component's pixel range. The
//! resamplers optionally leave component 0 untouched and resample only the
//! chroma planes.

pub mod downsample;
mod error;
pub mod flip;
mod resample;
pub mod scratch;
pub mod upsample;

pub use downsample::Downsampler;
pub use error::{TransformError, TransformResult};
pub use flip::{Axis, Flip};
pub use scratch::ScratchSet;
pub use upsample::{Upsampler, weights};
