//! Filling components from stored plane data
//!
//! Stored samples are byte aligned: one byte for up to 8 bits, two for up
//! to 16, four for up to 32 and eight for 64-bit samples. 16-bit floats are
//! stored as IEEE half precision and widened to `f32` on the way in.
//! Samples are written into the component in native byte order, honoring
//! its pitch.

use crate::packbits::PackBitsDecoder;
use crate::source::{ByteOrder, ByteSource, RawDecoder};
use crate::{IoError, IoResult};
use half::f16;
use planediff_core::{Component, SampleKind};

/// Compression scheme of a stored plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Samples stored verbatim
    #[default]
    None,
    /// PackBits run-length encoding
    PackBits,
}

impl Compression {
    /// Map a TIFF `Compression` tag value.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidData`] for schemes other than 1 (none) and
    /// 32773 (PackBits).
    pub fn from_tiff_tag(tag: u16) -> IoResult<Self> {
        match tag {
            1 => Ok(Compression::None),
            32773 => Ok(Compression::PackBits),
            other => Err(IoError::InvalidData(format!(
                "unsupported compression scheme {}",
                other
            ))),
        }
    }
}

/// Fill every sample of `comp` from `source`.
///
/// # Errors
///
/// - [`IoError::TruncatedPlane`] if the source runs dry before the plane
///   is complete
/// - [`IoError::Core`] if the component's sample format has no storage
///   class
pub fn read_plane<S: ByteSource>(source: &mut S, comp: &mut Component) -> IoResult<()> {
    let kind = comp.kind()?;
    let half = comp.is_float() && comp.bits() == 16;

    for y in 0..comp.height() {
        read_row(source, comp, kind, half, y).map_err(|e| match e {
            IoError::Underrun { offset, .. } => {
                log::warn!("plane data ends in row {} at input offset {}", y, offset);
                IoError::TruncatedPlane { row: y, offset }
            }
            other => other,
        })?;
    }
    Ok(())
}

fn read_row<S: ByteSource>(
    source: &mut S,
    comp: &mut Component,
    kind: SampleKind,
    half: bool,
    y: u32,
) -> IoResult<()> {
    for x in 0..comp.width() {
        match kind {
            SampleKind::U8 | SampleKind::I8 => {
                let v = source.next_byte()?;
                comp.set::<u8>(x, y, v);
            }
            SampleKind::U16 | SampleKind::I16 => {
                let v = source.read_u16()?;
                comp.set::<u16>(x, y, v);
            }
            SampleKind::F32 if half => {
                let v = f16::from_bits(source.read_u16()?).to_f32();
                comp.set::<f32>(x, y, v);
            }
            SampleKind::U32 | SampleKind::I32 | SampleKind::F32 => {
                let v = source.read_u32()?;
                comp.set::<u32>(x, y, v);
            }
            SampleKind::U64 | SampleKind::I64 | SampleKind::F64 => {
                let v = source.read_u64()?;
                comp.set::<u64>(x, y, v);
            }
        }
    }
    Ok(())
}

/// Decode one stored plane into `comp`.
///
/// # Examples
///
/// ```
/// use planediff_core::{Component, SampleFormat};
/// use planediff_io::{ByteOrder, Compression, decode_plane};
///
/// let fmt = SampleFormat::unsigned(8).unwrap();
/// let mut comp = Component::new(4, 2, fmt).unwrap();
/// // 4 x 9, then 4 x 1
/// decode_plane(&[0xFD, 9, 0xFD, 1], Compression::PackBits, ByteOrder::BigEndian, &mut comp)
///     .unwrap();
/// assert_eq!(comp.to_samples::<u8>().unwrap(), vec![9, 9, 9, 9, 1, 1, 1, 1]);
/// ```
///
/// # Errors
///
/// See [`read_plane`].
pub fn decode_plane(
    data: &[u8],
    compression: Compression,
    order: ByteOrder,
    comp: &mut Component,
) -> IoResult<()> {
    match compression {
        Compression::None => read_plane(&mut RawDecoder::new(data, order), comp),
        Compression::PackBits => read_plane(&mut PackBitsDecoder::new(data, order), comp),
    }
}
