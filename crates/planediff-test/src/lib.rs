//! planediff-test - Regression test framework for planediff
//!
//! Provides the bookkeeping used by the `*_reg.rs` integration tests and a
//! small set of synthetic image generators, so tests do not depend on image
//! files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use planediff_test::{RegParams, generators};
//!
//! let mut rp = RegParams::new("flip");
//! let plane = generators::gradient(7, 5, format)?;
//! rp.compare_values(7.0, plane.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
pub mod generators;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
