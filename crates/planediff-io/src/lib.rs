//! planediff-io - decoding stored plane data
//!
//! This crate provides:
//!
//! - [`PackBitsDecoder`] - pull-based PackBits run-length decompression
//! - [`RawDecoder`] - pass-through source for uncompressed planes
//! - [`ByteSource`] - the byte stream both decoders implement, with
//!   endian-aware multi-byte reads
//! - [`read_plane`] / [`decode_plane`] - fill a
//!   [`Component`](planediff_core::Component) from a stream
//!
//! Container parsing (TIFF directories, PNG chunks, ...) is left to the
//! caller, which supplies the compressed bytes and byte order of one plane.

mod error;
pub mod packbits;
pub mod plane;
pub mod source;

pub use error::{IoError, IoResult};
pub use packbits::PackBitsDecoder;
pub use plane::{Compression, decode_plane, read_plane};
pub use source::{ByteOrder, ByteSource, RawDecoder};
