//! planediff-meter - Measuring the difference between two planar images
//!
//! This crate provides:
//!
//! - [`Meter`] - the stage contract shared by transforms and metrics
//! - Metrics: [`Mse`], [`Psnr`], [`PeakError`] and [`Pre`]
//! - [`Pipeline`] - ordered stages over one image pair, buildable from a
//!   sequence string such as `"fx + d2.2 + psnr"`
//!
//! The transforms of `planediff-transform` ([`Flip`](planediff_transform::Flip),
//! [`Downsampler`](planediff_transform::Downsampler),
//! [`Upsampler`](planediff_transform::Upsampler)) implement [`Meter`] and
//! can be mixed freely with metrics.
//!
//! # Logging
//!
//! Stage progress is reported through the `log` facade at debug level and
//! stage failures at warn level. No logger is installed here.

mod error;
pub mod meter;
pub mod metrics;
pub mod pipeline;

pub use error::{MeterError, MeterResult};
pub use meter::Meter;
pub use metrics::{Mse, PeakError, Pre, PreType, Psnr};
pub use pipeline::{Pipeline, PipelineReport, Score};
