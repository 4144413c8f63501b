//! Component - one plane of a planar image
//!
//! A component owns a byte buffer and describes how samples are laid out in
//! it: `bytes_per_pixel` is the distance between horizontally adjacent
//! samples and `bytes_per_row` the distance between rows. Both may exceed
//! the packed size, so buffers produced by a loader with padded rows or
//! interleaved storage can be wrapped without copying.
//!
//! # Addressing
//!
//! The sample at `(x, y)` starts at byte `y * bytes_per_row + x *
//! bytes_per_pixel`. All access goes through slice indexing, so a bad
//! coordinate panics instead of reading foreign memory.

use crate::error::{Error, Result};
use crate::format::{PixelRange, SampleFormat, SampleKind};
use crate::sample::Sample;

/// Allocate a zeroed buffer, reporting failure instead of aborting.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the allocator refuses the request.
pub fn allocate(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// One plane of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    width: u32,
    height: u32,
    format: SampleFormat,
    sub_x: u8,
    sub_y: u8,
    bytes_per_pixel: usize,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl Component {
    /// Create a packed, zero-filled component without subsampling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, format: SampleFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let bpp = format.storage_bytes();
        let bpr = bpp * width as usize;
        let data = allocate(bpr * height as usize)?;
        Ok(Component {
            width,
            height,
            format,
            sub_x: 1,
            sub_y: 1,
            bytes_per_pixel: bpp,
            bytes_per_row: bpr,
            data,
        })
    }

    /// Wrap an existing buffer with an explicit pitch.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if width or height is 0
    /// - [`Error::InvalidPitch`] if `bytes_per_pixel` is smaller than one
    ///   sample or `bytes_per_row < bytes_per_pixel * width`
    /// - [`Error::BufferTooSmall`] if `data.len() < bytes_per_row * height`
    pub fn from_raw(
        width: u32,
        height: u32,
        format: SampleFormat,
        bytes_per_pixel: usize,
        bytes_per_row: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if bytes_per_pixel < format.storage_bytes()
            || bytes_per_row < bytes_per_pixel * width as usize
        {
            return Err(Error::InvalidPitch {
                bytes_per_pixel,
                bytes_per_row,
                width,
            });
        }
        let needed = bytes_per_row * height as usize;
        if data.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Component {
            width,
            height,
            format,
            sub_x: 1,
            sub_y: 1,
            bytes_per_pixel,
            bytes_per_row,
            data,
        })
    }

    /// Build a packed component from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `T` is not the storage type
    /// of `format`, and [`Error::BufferTooSmall`] if `samples` does not hold
    /// exactly `width * height` values.
    pub fn from_samples<T: Sample>(
        width: u32,
        height: u32,
        format: SampleFormat,
        samples: &[T],
    ) -> Result<Self> {
        check_storage::<T>(format)?;
        let count = width as usize * height as usize;
        if samples.len() != count {
            return Err(Error::BufferTooSmall {
                needed: count,
                actual: samples.len(),
            });
        }
        let mut comp = Component::new(width, height, format)?;
        for (chunk, &v) in comp.data.chunks_exact_mut(T::BYTES).zip(samples) {
            v.write(chunk);
        }
        Ok(comp)
    }

    /// Set the subsampling factors relative to the full image grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSubsampling`] if either factor is 0.
    pub fn with_subsampling(mut self, sub_x: u8, sub_y: u8) -> Result<Self> {
        if sub_x == 0 || sub_y == 0 {
            return Err(Error::InvalidSubsampling { sub_x, sub_y });
        }
        self.sub_x = sub_x;
        self.sub_y = sub_y;
        Ok(self)
    }

    /// Width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample format.
    #[inline]
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Bit depth.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.format.bits()
    }

    /// Whether samples are signed.
    #[inline]
    pub fn is_signed(&self) -> bool {
        self.format.is_signed()
    }

    /// Whether samples are floating point.
    #[inline]
    pub fn is_float(&self) -> bool {
        self.format.is_float()
    }

    /// Horizontal subsampling factor.
    #[inline]
    pub fn sub_x(&self) -> u8 {
        self.sub_x
    }

    /// Vertical subsampling factor.
    #[inline]
    pub fn sub_y(&self) -> u8 {
        self.sub_y
    }

    /// Byte distance between horizontally adjacent samples.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Byte distance between rows.
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Raw buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw buffer, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Representable range of this component's samples.
    pub fn range(&self) -> PixelRange {
        PixelRange::of(self.format)
    }

    /// Storage type of this component's samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for formats outside the
    /// supported storage classes.
    pub fn kind(&self) -> Result<SampleKind> {
        SampleKind::resolve(self.format)
    }

    /// Whether the buffer is tightly packed.
    pub fn is_packed(&self) -> bool {
        self.bytes_per_pixel == self.format.storage_bytes()
            && self.bytes_per_row == self.bytes_per_pixel * self.width as usize
    }

    /// Byte offset of the sample at `(x, y)`.
    #[inline]
    pub fn sample_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.bytes_per_row + x as usize * self.bytes_per_pixel
    }

    /// Read the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the buffer.
    #[inline]
    pub fn get<T: Sample>(&self, x: u32, y: u32) -> T {
        let off = self.sample_offset(x, y);
        T::read(&self.data[off..off + T::BYTES])
    }

    /// Write the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the buffer.
    #[inline]
    pub fn set<T: Sample>(&mut self, x: u32, y: u32, value: T) {
        let off = self.sample_offset(x, y);
        value.write(&mut self.data[off..off + T::BYTES]);
    }

    /// Bytes of row `y`, `bytes_per_row` long.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.bytes_per_row;
        &self.data[start..start + self.bytes_per_row]
    }

    /// Bytes of row `y`, mutable.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.bytes_per_row;
        &mut self.data[start..start + self.bytes_per_row]
    }

    /// Copy all samples out in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `T` is not the storage type
    /// of this component.
    pub fn to_samples<T: Sample>(&self) -> Result<Vec<T>> {
        check_storage::<T>(self.format)?;
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.get::<T>(x, y));
            }
        }
        Ok(out)
    }
}

fn check_storage<T: Sample>(format: SampleFormat) -> Result<()> {
    if T::BYTES != format.storage_bytes() {
        return Err(Error::UnsupportedFormat {
            bits: format.bits(),
            signed: format.is_signed(),
            float: format.is_float(),
        });
    }
    Ok(())
}
