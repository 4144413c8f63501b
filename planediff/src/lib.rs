//! planediff - Comparing planar images
//!
//! Compares two images held as independent planes (each with its own size,
//! subsampling, bit depth and integer/float storage) and produces scalar
//! quality metrics, optionally after resampling or mirroring both images.
//! A typical use is validating a lossy codec by scoring its decoded output
//! against the original.
//!
//! # Overview
//!
//! - Planar image layout and sample formats (this crate's root)
//! - Plane decoding, including PackBits ([`io`])
//! - Integer-ratio resampling and mirroring ([`transform`])
//! - Metrics and measurement pipelines ([`meter`])
//!
//! # Example
//!
//! ```
//! use planediff::{Component, ImageLayout, SampleFormat};
//! use planediff::meter::Pipeline;
//!
//! let fmt = SampleFormat::unsigned(8).unwrap();
//! let mut reference = ImageLayout::new(vec![
//!     Component::from_samples(2, 2, fmt, &[10u8, 20, 30, 40]).unwrap(),
//! ]);
//! let mut decoded = ImageLayout::new(vec![
//!     Component::from_samples(2, 2, fmt, &[10u8, 20, 30, 42]).unwrap(),
//! ]);
//!
//! let report = Pipeline::parse("mse + peak")
//!     .unwrap()
//!     .run(&mut reference, &mut decoded)
//!     .unwrap();
//! assert_eq!(report.score("MSE"), Some(1.0));
//! assert_eq!(report.value(), 2.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use planediff_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use planediff_io as io;
pub use planediff_meter as meter;
pub use planediff_transform as transform;
