//! planediff-core - planar image layout and sample formats
//!
//! This crate provides the data structures every other planediff crate
//! operates on:
//!
//! - [`ImageLayout`] - an image as an ordered list of components
//! - [`Component`] - one independently sized and subsampled plane
//! - [`SampleFormat`] - bit depth, signedness and float flag of a plane
//! - [`PixelRange`] - the saturation interval of a sample format
//! - [`SampleKind`] / [`Sample`] - closed storage-type dispatch used by the
//!   numeric algorithms
//!
//! # Example
//!
//! ```
//! use planediff_core::{Component, ImageLayout, PixelRange, SampleFormat};
//!
//! let fmt = SampleFormat::unsigned(10).unwrap();
//! let plane = Component::new(64, 48, fmt).unwrap();
//! assert_eq!(plane.bytes_per_pixel(), 2);
//!
//! let img = ImageLayout::new(vec![plane]);
//! assert_eq!(img.component(0).unwrap().range(), PixelRange::Integer { min: 0, max: 1023 });
//! ```

pub mod component;
pub mod error;
pub mod format;
pub mod layout;
pub mod sample;

pub use component::{Component, allocate};
pub use error::{Error, Result};
pub use format::{PixelRange, SampleFormat, SampleKind};
pub use layout::ImageLayout;
pub use sample::Sample;
