//! Sample formats, pixel ranges and storage-class dispatch
//!
//! A component's samples are described by a [`SampleFormat`]: bit depth,
//! signedness and whether the samples are floating point. Everything the
//! transforms need to know about a format is derived from that triple:
//!
//! - [`SampleFormat::storage_bytes`] - how many bytes one sample occupies
//! - [`PixelRange::of`] - the numeric interval every computed value is
//!   saturated into before it is stored
//! - [`SampleKind::resolve`] - the closed set of concrete storage types the
//!   numeric algorithms are specialised for
//!
//! # Storage classes
//!
//! | bits | integer | float |
//! |---|---|---|
//! | 1..=8 | `u8` / `i8` | `u8` / `i8` |
//! | 9..=16 | `u16` / `i16` | `f32` (stored widened) |
//! | 17..=32 | `u32` / `i32` | `f32` |
//! | 64 | `u64` / `i64` | `f64` |

use crate::error::{Error, Result};

/// Bit depth, signedness and float flag of a component's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleFormat {
    bits: u8,
    signed: bool,
    float: bool,
}

impl SampleFormat {
    /// Create a sample format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not in `1..=64`.
    pub fn new(bits: u8, signed: bool, float: bool) -> Result<Self> {
        if bits == 0 || bits > 64 {
            return Err(Error::InvalidDepth(bits));
        }
        Ok(Self {
            bits,
            signed,
            float,
        })
    }

    /// Unsigned integer samples of the given depth.
    pub fn unsigned(bits: u8) -> Result<Self> {
        Self::new(bits, false, false)
    }

    /// Signed (two's complement) integer samples of the given depth.
    pub fn signed(bits: u8) -> Result<Self> {
        Self::new(bits, true, false)
    }

    /// Signed floating point samples (16, 32 or 64 bits).
    pub fn float(bits: u8) -> Result<Self> {
        Self::new(bits, true, true)
    }

    /// Bit depth.
    #[inline]
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// Whether samples are signed.
    #[inline]
    pub fn is_signed(self) -> bool {
        self.signed
    }

    /// Whether samples are floating point.
    #[inline]
    pub fn is_float(self) -> bool {
        self.float
    }

    /// Number of bytes one sample occupies in memory.
    ///
    /// A 16-bit float is held as a 32-bit float; the reported bit depth
    /// stays 16.
    pub fn storage_bytes(self) -> usize {
        match self.bits {
            0..=8 => 1,
            9..=16 if !self.float => 2,
            9..=32 => 4,
            _ => 8,
        }
    }
}

/// Representable numeric interval of a sample format.
///
/// Integer bounds are exact. Float formats are unbounded; the sentinel
/// `f64::MAX` stands in for infinity. Unsigned floats saturate at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelRange {
    /// Exact integer bounds (inclusive)
    Integer { min: i128, max: i128 },
    /// Float bounds (inclusive)
    Float { min: f64, max: f64 },
}

impl PixelRange {
    /// Finite stand-in for an unbounded float range.
    pub const FLOAT_LIMIT: f64 = f64::MAX;

    /// Derive the range of a sample format.
    pub fn of(format: SampleFormat) -> Self {
        let bits = u32::from(format.bits());
        match (format.is_float(), format.is_signed()) {
            (true, true) => PixelRange::Float {
                min: -Self::FLOAT_LIMIT,
                max: Self::FLOAT_LIMIT,
            },
            (true, false) => PixelRange::Float {
                min: 0.0,
                max: Self::FLOAT_LIMIT,
            },
            (false, true) => PixelRange::Integer {
                min: -(1i128 << (bits - 1)),
                max: (1i128 << (bits - 1)) - 1,
            },
            (false, false) => PixelRange::Integer {
                min: 0,
                max: (1i128 << bits) - 1,
            },
        }
    }

    /// Lower bound as a double.
    pub fn min(&self) -> f64 {
        match *self {
            PixelRange::Integer { min, .. } => min as f64,
            PixelRange::Float { min, .. } => min,
        }
    }

    /// Upper bound as a double.
    pub fn max(&self) -> f64 {
        match *self {
            PixelRange::Integer { max, .. } => max as f64,
            PixelRange::Float { max, .. } => max,
        }
    }

    /// Width of the interval, `max - min`.
    pub fn span(&self) -> f64 {
        self.max() - self.min()
    }

    /// Saturate an integer value. Float ranges pass the value through.
    #[inline]
    pub fn clamp_int(&self, v: i128) -> i128 {
        match *self {
            PixelRange::Integer { min, max } => v.clamp(min, max),
            PixelRange::Float { .. } => v,
        }
    }

    /// Saturate a double. NaN is passed through unchanged.
    #[inline]
    pub fn clamp_f64(&self, v: f64) -> f64 {
        let (min, max) = (self.min(), self.max());
        if v > max {
            max
        } else if v < min {
            min
        } else {
            v
        }
    }

    /// Whether `v` lies inside the interval.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min() && v <= self.max()
    }
}

/// Concrete storage type of a component, resolved once per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl SampleKind {
    /// Map a sample format onto its storage type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for samples of 33 to 63 bits.
    pub fn resolve(format: SampleFormat) -> Result<Self> {
        let signed = format.is_signed();
        let kind = match (format.is_float(), format.bits()) {
            // byte-sized samples are stored as integers, float flag or not
            (_, 1..=8) => Some(if signed { SampleKind::I8 } else { SampleKind::U8 }),
            (false, 9..=16) => Some(if signed { SampleKind::I16 } else { SampleKind::U16 }),
            (false, 17..=32) => Some(if signed { SampleKind::I32 } else { SampleKind::U32 }),
            (true, 9..=32) => Some(SampleKind::F32),
            (true, 64) => Some(SampleKind::F64),
            (false, 64) => Some(if signed { SampleKind::I64 } else { SampleKind::U64 }),
            _ => None,
        };
        kind.ok_or(Error::UnsupportedFormat {
            bits: format.bits(),
            signed,
            float: format.is_float(),
        })
    }

    /// Size of the storage type in bytes.
    pub fn bytes(self) -> usize {
        match self {
            SampleKind::U8 | SampleKind::I8 => 1,
            SampleKind::U16 | SampleKind::I16 => 2,
            SampleKind::U32 | SampleKind::I32 | SampleKind::F32 => 4,
            SampleKind::U64 | SampleKind::I64 | SampleKind::F64 => 8,
        }
    }
}

/// Run `$body` with `$T` bound to the storage type selected by a
/// [`SampleKind`].
///
/// ```
/// use planediff_core::{Sample, SampleKind, with_sample_type};
///
/// let kind = SampleKind::U16;
/// let bytes = with_sample_type!(kind, T => <T as Sample>::BYTES);
/// assert_eq!(bytes, 2);
/// ```
#[macro_export]
macro_rules! with_sample_type {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            $crate::SampleKind::U8 => {
                type $T = u8;
                $body
            }
            $crate::SampleKind::I8 => {
                type $T = i8;
                $body
            }
            $crate::SampleKind::U16 => {
                type $T = u16;
                $body
            }
            $crate::SampleKind::I16 => {
                type $T = i16;
                $body
            }
            $crate::SampleKind::U32 => {
                type $T = u32;
                $body
            }
            $crate::SampleKind::I32 => {
                type $T = i32;
                $body
            }
            $crate::SampleKind::U64 => {
                type $T = u64;
                $body
            }
            $crate::SampleKind::I64 => {
                type $T = i64;
                $body
            }
            $crate::SampleKind::F32 => {
                type $T = f32;
                $body
            }
            $crate::SampleKind::F64 => {
                type $T = f64;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_depth() {
        assert!(matches!(
            SampleFormat::new(0, false, false),
            Err(Error::InvalidDepth(0))
        ));
        assert!(matches!(
            SampleFormat::new(65, false, false),
            Err(Error::InvalidDepth(65))
        ));
    }

    #[test]
    fn test_storage_bytes() {
        assert_eq!(SampleFormat::unsigned(1).unwrap().storage_bytes(), 1);
        assert_eq!(SampleFormat::unsigned(8).unwrap().storage_bytes(), 1);
        assert_eq!(SampleFormat::signed(12).unwrap().storage_bytes(), 2);
        assert_eq!(SampleFormat::float(16).unwrap().storage_bytes(), 4);
        assert_eq!(SampleFormat::unsigned(24).unwrap().storage_bytes(), 4);
        assert_eq!(SampleFormat::unsigned(40).unwrap().storage_bytes(), 8);
        assert_eq!(SampleFormat::float(64).unwrap().storage_bytes(), 8);
    }

    #[test]
    fn test_integer_ranges() {
        let r = PixelRange::of(SampleFormat::unsigned(8).unwrap());
        assert_eq!(r, PixelRange::Integer { min: 0, max: 255 });

        let r = PixelRange::of(SampleFormat::signed(8).unwrap());
        assert_eq!(r, PixelRange::Integer { min: -128, max: 127 });

        let r = PixelRange::of(SampleFormat::unsigned(12).unwrap());
        assert_eq!(r, PixelRange::Integer { min: 0, max: 4095 });

        let r = PixelRange::of(SampleFormat::signed(1).unwrap());
        assert_eq!(r, PixelRange::Integer { min: -1, max: 0 });

        let r = PixelRange::of(SampleFormat::unsigned(64).unwrap());
        assert_eq!(
            r,
            PixelRange::Integer {
                min: 0,
                max: u64::MAX as i128
            }
        );

        let r = PixelRange::of(SampleFormat::signed(64).unwrap());
        assert_eq!(
            r,
            PixelRange::Integer {
                min: i64::MIN as i128,
                max: i64::MAX as i128
            }
        );
    }

    #[test]
    fn test_float_ranges() {
        let r = PixelRange::of(SampleFormat::float(32).unwrap());
        assert_eq!(r.max(), f64::MAX);
        assert_eq!(r.min(), -f64::MAX);

        let unsigned = PixelRange::of(SampleFormat::new(32, false, true).unwrap());
        assert_eq!(unsigned.min(), 0.0);
        assert_eq!(unsigned.clamp_f64(-3.5), 0.0);
    }

    #[test]
    fn test_clamp() {
        let r = PixelRange::of(SampleFormat::unsigned(10).unwrap());
        assert_eq!(r.clamp_int(-5), 0);
        assert_eq!(r.clamp_int(5000), 1023);
        assert_eq!(r.clamp_f64(1023.7), 1023.0);
        assert!(r.clamp_f64(f64::NAN).is_nan());
    }

    #[test]
    fn test_resolve_kinds() {
        let k = |b, s, f| SampleKind::resolve(SampleFormat::new(b, s, f).unwrap());
        assert_eq!(k(1, false, false).unwrap(), SampleKind::U8);
        assert_eq!(k(8, true, false).unwrap(), SampleKind::I8);
        assert_eq!(k(10, false, false).unwrap(), SampleKind::U16);
        assert_eq!(k(16, true, false).unwrap(), SampleKind::I16);
        assert_eq!(k(20, false, false).unwrap(), SampleKind::U32);
        assert_eq!(k(16, true, true).unwrap(), SampleKind::F32);
        assert_eq!(k(32, true, true).unwrap(), SampleKind::F32);
        assert_eq!(k(64, false, false).unwrap(), SampleKind::U64);
        assert_eq!(k(64, true, true).unwrap(), SampleKind::F64);
    }

    #[test]
    fn test_resolve_unsupported() {
        let k = |b, s, f| SampleKind::resolve(SampleFormat::new(b, s, f).unwrap());
        assert!(matches!(
            k(40, false, false),
            Err(Error::UnsupportedFormat { bits: 40, .. })
        ));
        assert!(matches!(
            k(48, true, true),
            Err(Error::UnsupportedFormat { float: true, .. })
        ));
    }

    #[test]
    fn test_resolve_odd_float_widths() {
        let k = |b, s, f| SampleKind::resolve(SampleFormat::new(b, s, f).unwrap()).unwrap();
        assert_eq!(k(8, false, true), SampleKind::U8);
        assert_eq!(k(4, true, true), SampleKind::I8);
        assert_eq!(k(12, true, true), SampleKind::F32);
        assert_eq!(k(24, true, true), SampleKind::F32);
        for bits in [1u8, 8, 9, 16, 24, 32, 64] {
            let format = SampleFormat::new(bits, true, true).unwrap();
            assert_eq!(
                SampleKind::resolve(format).unwrap().bytes(),
                format.storage_bytes()
            );
        }
    }

    #[test]
    fn test_kind_bytes_match_storage() {
        for bits in [1u8, 8, 9, 16, 17, 32, 64] {
            for signed in [false, true] {
                let format = SampleFormat::new(bits, signed, false).unwrap();
                let kind = SampleKind::resolve(format).unwrap();
                assert_eq!(kind.bytes(), format.storage_bytes());
            }
        }
        let half = SampleFormat::float(16).unwrap();
        assert_eq!(
            SampleKind::resolve(half).unwrap().bytes(),
            half.storage_bytes()
        );
    }
}
