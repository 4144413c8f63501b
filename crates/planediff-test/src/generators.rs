//! Synthetic components for tests
//!
//! Every generator evaluates a function per sample in `f64`, saturates the
//! result into the component's [`PixelRange`](planediff_core::PixelRange)
//! and stores it with the component's storage type.

use crate::TestResult;
use planediff_core::{Component, Sample, SampleFormat, with_sample_type};

/// Build a packed component from a per-sample function.
pub fn from_fn<F>(width: u32, height: u32, format: SampleFormat, mut f: F) -> TestResult<Component>
where
    F: FnMut(u32, u32) -> f64,
{
    let mut comp = Component::new(width, height, format)?;
    let range = comp.range();
    let kind = comp.kind()?;
    for y in 0..height {
        for x in 0..width {
            let v = range.clamp_f64(f(x, y));
            with_sample_type!(kind, T => comp.set::<T>(x, y, <T as Sample>::from_f64(v)));
        }
    }
    Ok(comp)
}

/// Every sample set to `value`.
pub fn constant(width: u32, height: u32, format: SampleFormat, value: f64) -> TestResult<Component> {
    from_fn(width, height, format, |_, _| value)
}

/// Diagonal ramp spanning the integer range (or `0..width+height` for
/// floats).
pub fn gradient(width: u32, height: u32, format: SampleFormat) -> TestResult<Component> {
    let steps = f64::from(width + height).max(2.0) - 1.0;
    let (lo, span) = if format.is_float() {
        (0.0, steps)
    } else {
        let range = planediff_core::PixelRange::of(format);
        (range.min(), range.span())
    };
    from_fn(width, height, format, |x, y| {
        (lo + f64::from(x + y) * span / steps).floor()
    })
}

/// Alternating `lo` / `hi` samples.
pub fn checkerboard(
    width: u32,
    height: u32,
    format: SampleFormat,
    lo: f64,
    hi: f64,
) -> TestResult<Component> {
    from_fn(width, height, format, |x, y| if (x + y) % 2 == 0 { lo } else { hi })
}

/// Checkerboard of the format's own minimum and maximum; for floats
/// `-1e30` / `1e30`.
pub fn extremes(width: u32, height: u32, format: SampleFormat) -> TestResult<Component> {
    let (lo, hi) = if format.is_float() {
        (-1e30, 1e30)
    } else {
        let range = planediff_core::PixelRange::of(format);
        (range.min(), range.max())
    };
    checkerboard(width, height, format, lo, hi)
}

/// Deterministic pseudo-random samples (xorshift), uniform over the range.
pub fn noise(width: u32, height: u32, format: SampleFormat, seed: u64) -> TestResult<Component> {
    let mut state = seed | 1;
    let (lo, span) = if format.is_float() {
        (-1000.0, 2000.0)
    } else {
        let range = planediff_core::PixelRange::of(format);
        (range.min(), range.span())
    };
    from_fn(width, height, format, move |_, _| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
        (lo + unit * span).floor()
    })
}
