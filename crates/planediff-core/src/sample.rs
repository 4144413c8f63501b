//! Typed sample access over raw component bytes
//!
//! Component buffers are plain byte vectors in native byte order. The
//! [`Sample`] trait is implemented for every storage type a
//! [`SampleKind`](crate::SampleKind) can name and gives the numeric
//! algorithms a uniform way to read, write, widen and saturate values.

use crate::format::PixelRange;
use std::fmt::Debug;
use std::ops::Add;

/// A fixed-width storage type for one sample.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Size in bytes.
    const BYTES: usize;

    /// Wide accumulator used for block sums.
    type Acc: Copy + Add<Output = Self::Acc>;

    /// Additive identity of [`Sample::Acc`].
    const ZERO: Self::Acc;

    /// Decode from the first `BYTES` bytes of `bytes` (native order).
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `BYTES`.
    fn read(bytes: &[u8]) -> Self;

    /// Encode into the first `BYTES` bytes of `bytes` (native order).
    fn write(self, bytes: &mut [u8]);

    /// Numeric value as a double.
    fn to_f64(self) -> f64;

    /// Convert a double that has already been saturated into the
    /// component's range. Integers truncate toward zero.
    fn from_f64(v: f64) -> Self;

    /// Widen into the accumulator type.
    fn widen(self) -> Self::Acc;

    /// Average of `count` accumulated samples, rounded to nearest and
    /// saturated into `range`.
    fn box_mean(sum: Self::Acc, count: u32, range: &PixelRange) -> Self;
}

macro_rules! impl_int_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const BYTES: usize = std::mem::size_of::<$t>();
            type Acc = i128;
            const ZERO: i128 = 0;

            #[inline]
            fn read(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_ne_bytes(raw)
            }

            #[inline]
            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline]
            fn box_mean(sum: i128, count: u32, range: &PixelRange) -> Self {
                let n = i128::from(count);
                // ties round away from zero
                let q = if sum >= 0 {
                    (sum + n / 2) / n
                } else {
                    (sum - n / 2) / n
                };
                range.clamp_int(q) as $t
            }
        }
    )*};
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const BYTES: usize = std::mem::size_of::<$t>();
            type Acc = f64;
            const ZERO: f64 = 0.0;

            #[inline]
            fn read(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_ne_bytes(raw)
            }

            #[inline]
            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn widen(self) -> f64 {
                self as f64
            }

            #[inline]
            fn box_mean(sum: f64, count: u32, range: &PixelRange) -> Self {
                range.clamp_f64(sum / f64::from(count)) as $t
            }
        }
    )*};
}

impl_int_sample!(u8, i8, u16, i16, u32, i32, u64, i64);
impl_float_sample!(f32, f64);
