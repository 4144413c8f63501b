//! PackBits run-length decoding
//!
//! PackBits is the byte-oriented RLE used by TIFF (compression 32773) and
//! Macintosh PICT. The stream is a sequence of runs, each introduced by a
//! signed control byte `n`:
//!
//! | `n` | meaning |
//! |---|---|
//! | `0..=127` | copy the next `n + 1` bytes verbatim |
//! | `-127..=-1` | repeat the next byte `1 - n` times |
//! | `-128` | no operation |
//!
//! The decoder is pull based: [`PackBitsDecoder::next_byte`] returns one
//! decoded byte per call and reads input only as far as needed. Any attempt
//! to read past the end of the compressed data is reported as
//! [`IoError::Underrun`].

use crate::source::{ByteOrder, ByteSource};
use crate::{IoError, IoResult};

/// Incremental PackBits decoder over a borrowed input buffer.
///
/// # Examples
///
/// ```
/// use planediff_io::{ByteOrder, ByteSource, PackBitsDecoder};
///
/// let data = [0xFDu8, b'z', 1, b'a', b'b'];
/// let mut dec = PackBitsDecoder::new(&data, ByteOrder::BigEndian);
/// let mut out = [0u8; 6];
/// dec.read_exact(&mut out).unwrap();
/// assert_eq!(&out, b"zzzzab");
/// ```
#[derive(Debug, Clone)]
pub struct PackBitsDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
    /// Verbatim bytes still to be copied from the input
    literal_remaining: u8,
    /// Copies of `repeat_value` still to be emitted
    repeat_remaining: u8,
    repeat_value: u8,
}

impl<'a> PackBitsDecoder<'a> {
    /// Start decoding `data`. `order` is only used when multi-byte samples
    /// are reassembled through [`ByteSource`].
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        PackBitsDecoder {
            data,
            pos: 0,
            order,
            literal_remaining: 0,
            repeat_remaining: 0,
            repeat_value: 0,
        }
    }

    /// Bytes of the current literal run not yet emitted.
    pub fn literal_remaining(&self) -> u8 {
        self.literal_remaining
    }

    /// Bytes of the current repeat run not yet emitted.
    pub fn repeat_remaining(&self) -> u8 {
        self.repeat_remaining
    }

    /// Whether all input is consumed and no run is pending.
    pub fn is_finished(&self) -> bool {
        self.literal_remaining == 0 && self.repeat_remaining == 0 && self.pos >= self.data.len()
    }

    fn fetch(&mut self, owed: usize) -> IoResult<u8> {
        let b = *self.data.get(self.pos).ok_or(IoError::Underrun {
            offset: self.pos,
            owed,
        })?;
        self.pos += 1;
        Ok(b)
    }

    /// Decode the next byte.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Underrun`] if the input ends inside a run, or if
    /// no control byte is left when another byte is requested.
    pub fn next_byte(&mut self) -> IoResult<u8> {
        loop {
            if self.literal_remaining > 0 {
                let b = self.fetch(usize::from(self.literal_remaining))?;
                self.literal_remaining -= 1;
                return Ok(b);
            }
            if self.repeat_remaining > 0 {
                self.repeat_remaining -= 1;
                return Ok(self.repeat_value);
            }

            let control = self.fetch(1)? as i8;
            match control {
                -128 => {}
                0..=127 => self.literal_remaining = control as u8 + 1,
                n => {
                    let count = (1 - i16::from(n)) as u8;
                    self.repeat_value = self.fetch(usize::from(count))?;
                    self.repeat_remaining = count;
                }
            }
        }
    }

    /// Decode everything left in the input.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Underrun`] if the input ends inside a run.
    pub fn decode_to_end(&mut self) -> IoResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data.len().saturating_mul(2));
        while !self.is_finished() {
            match self.next_byte() {
                Ok(b) => out.push(b),
                // trailing no-op control bytes
                Err(IoError::Underrun { owed: 1, .. })
                    if self.literal_remaining == 0 && self.repeat_remaining == 0 =>
                {
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }
}

impl ByteSource for PackBitsDecoder<'_> {
    fn next_byte(&mut self) -> IoResult<u8> {
        PackBitsDecoder::next_byte(self)
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn position(&self) -> usize {
        self.pos
    }
}
