//! zlib (RFC 1950) compression of the scanline buffer.
//!
//! The compressor itself is `flate2`; this module only decides how much
//! output space to reserve and reports the true stream length separately
//! from that reservation.

use crate::config::CompressionLevel;
use crate::error::EncodeError;
use flate2::{Compress, FlushCompress, Status};
use log::debug;

/// Worst-case zlib output size for `len` input bytes (zlib's `compressBound`).
pub fn zlib_bound(len: usize) -> usize {
    len + (len >> 12) + (len >> 14) + (len >> 25) + 13
}

/// A finished zlib stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    data: Vec<u8>,
    reserved: usize,
}

impl Compressed {
    /// The stream bytes, exactly [`len`](Self::len) of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// True length of the stream.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Output space that was reserved for compression. Never a chunk length.
    pub fn capacity(&self) -> usize {
        self.reserved
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Turns raw bytes into a zlib-wrapped deflate stream.
pub trait Compressor {
    fn compress(&self, raw: &[u8]) -> Result<Compressed, EncodeError>;
}

/// [`Compressor`] backed by `flate2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibCompressor {
    level: CompressionLevel,
}

impl ZlibCompressor {
    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Compresses into `capacity` bytes of output space, growing the space
    /// by the same amount once if the stream does not finish.
    fn compress_within(&self, raw: &[u8], capacity: usize) -> Result<Compressed, EncodeError> {
        let mut stream = Compress::new(self.level.into(), true);
        let mut out = Vec::with_capacity(capacity);
        let mut reserved = capacity;

        for attempt in 0..2 {
            let consumed = stream.total_in() as usize;
            let status = stream
                .compress_vec(&raw[consumed..], &mut out, FlushCompress::Finish)
                .map_err(|e| EncodeError::CompressionFailure(e.to_string()))?;
            if matches!(status, Status::StreamEnd) {
                debug!(
                    "compressed {} bytes to {} (reserved {reserved})",
                    raw.len(),
                    out.len()
                );
                return Ok(Compressed {
                    data: out,
                    reserved,
                });
            }
            if attempt == 0 {
                debug!("zlib output exceeded {reserved} bytes, growing by {capacity}");
                out.reserve(capacity);
                reserved += capacity;
            }
        }

        Err(EncodeError::CompressionFailure(format!(
            "zlib stream for {} input bytes did not fit in {reserved} bytes",
            raw.len()
        )))
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, raw: &[u8]) -> Result<Compressed, EncodeError> {
        self.compress_within(raw, zlib_bound(raw.len()))
    }
}
