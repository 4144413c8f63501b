//! Byte sources for plane readers
//!
//! A [`ByteSource`] yields the decoded bytes of one stored plane, one at a
//! time, and knows the byte order multi-byte samples were written in. The
//! decoders themselves only ever emit bytes; reassembling wider samples is
//! done here, on top of [`ByteSource::next_byte`].

use crate::{IoError, IoResult};

/// Byte order of multi-byte samples in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first (TIFF "MM")
    BigEndian,
    /// Least significant byte first (TIFF "II")
    LittleEndian,
}

impl ByteOrder {
    /// Byte order of the running machine.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }
}

/// A pull-based stream of decoded bytes.
pub trait ByteSource {
    /// Next decoded byte.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Underrun`] when the input is exhausted.
    fn next_byte(&mut self) -> IoResult<u8>;

    /// Byte order used for multi-byte reads.
    fn byte_order(&self) -> ByteOrder;

    /// Number of input bytes consumed so far.
    fn position(&self) -> usize;

    /// Fill `buf` completely.
    fn read_exact(&mut self, buf: &mut [u8]) -> IoResult<()> {
        for b in buf.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(())
    }

    /// Read a 16-bit value in the stream's byte order.
    fn read_u16(&mut self) -> IoResult<u16> {
        let mut raw = [0u8; 2];
        self.read_exact(&mut raw)?;
        Ok(match self.byte_order() {
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
        })
    }

    /// Read a 32-bit value in the stream's byte order.
    fn read_u32(&mut self) -> IoResult<u32> {
        let mut raw = [0u8; 4];
        self.read_exact(&mut raw)?;
        Ok(match self.byte_order() {
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
        })
    }

    /// Read a 64-bit value in the stream's byte order.
    fn read_u64(&mut self) -> IoResult<u64> {
        let mut raw = [0u8; 8];
        self.read_exact(&mut raw)?;
        Ok(match self.byte_order() {
            ByteOrder::BigEndian => u64::from_be_bytes(raw),
            ByteOrder::LittleEndian => u64::from_le_bytes(raw),
        })
    }
}

/// Uncompressed storage: bytes are passed through verbatim.
#[derive(Debug, Clone)]
pub struct RawDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> RawDecoder<'a> {
    /// Read from `data` in the given byte order.
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        RawDecoder {
            data,
            pos: 0,
            order,
        }
    }
}

impl ByteSource for RawDecoder<'_> {
    fn next_byte(&mut self) -> IoResult<u8> {
        let b = *self.data.get(self.pos).ok_or(IoError::Underrun {
            offset: self.pos,
            owed: 1,
        })?;
        self.pos += 1;
        Ok(b)
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endian_reads() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let mut be = RawDecoder::new(&data, ByteOrder::BigEndian);
        assert_eq!(be.read_u16().unwrap(), 0x1234);
        assert_eq!(be.read_u16().unwrap(), 0x5678);

        let mut le = RawDecoder::new(&data, ByteOrder::LittleEndian);
        assert_eq!(le.read_u32().unwrap(), 0x7856_3412);
    }

    #[test]
    fn test_raw_underrun() {
        let data = [1u8, 2, 3];
        let mut src = RawDecoder::new(&data, ByteOrder::BigEndian);
        let err = src.read_u32().unwrap_err();
        assert!(matches!(err, IoError::Underrun { offset: 3, owed: 1 }));
    }

    #[test]
    fn test_u64_big_endian() {
        let data = [0, 0, 0, 0, 0, 0, 1, 2];
        let mut src = RawDecoder::new(&data, ByteOrder::BigEndian);
        assert_eq!(src.read_u64().unwrap(), 0x0102);
        assert_eq!(src.position(), 8);
    }
}
