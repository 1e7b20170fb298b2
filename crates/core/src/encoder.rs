//! Image assembly: scanlines, compression and the three chunks.
//!
//! The output of [`Encoder::encode`] is always
//! `signature ‖ IHDR ‖ IDAT ‖ IEND`, 8-bit truecolor, no interlacing, every
//! scanline using filter type 0.

use crate::chunk::{write_chunk, ChunkType, CHUNK_OVERHEAD};
use crate::compress::{Compressor, ZlibCompressor};
use crate::config::EncoderConfig;
use crate::crc::{CrcTable, PNG_CRC};
use crate::error::EncodeError;
use crate::pixel::PixelSource;
use log::debug;

/// The fixed 8-byte PNG file signature.
pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest width or height PNG allows.
pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

pub const BIT_DEPTH: u8 = 8;
/// Truecolor without alpha.
pub const COLOR_TYPE_RGB: u8 = 2;
pub const FILTER_NONE: u8 = 0;
pub const BYTES_PER_PIXEL: usize = 3;

/// Length of the IHDR payload.
pub const IHDR_LEN: usize = 13;

/// The IEND chunk never varies: empty payload, CRC of `"IEND"`.
pub const IEND_CHUNK: [u8; 12] = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

/// Encodes pixel sources as PNG byte streams.
///
/// Holds a borrowed CRC table and a compressor; both are read-only during
/// encoding, so one encoder can serve many threads.
#[derive(Debug, Clone)]
pub struct Encoder<'t, C = ZlibCompressor> {
    table: &'t CrcTable,
    compressor: C,
}

impl Encoder<'static, ZlibCompressor> {
    /// Encoder using the shared CRC table and a zlib compressor configured by `config`.
    pub fn new(config: EncoderConfig) -> Self {
        Self::with_parts(&PNG_CRC, ZlibCompressor::new(config.compression))
    }
}

impl Default for Encoder<'static, ZlibCompressor> {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl<'t, C: Compressor> Encoder<'t, C> {
    pub fn with_parts(table: &'t CrcTable, compressor: C) -> Self {
        Self { table, compressor }
    }

    /// Encodes a `width`×`height` image sampled from `source`.
    ///
    /// Returns `EncodeError::InvalidDimensions` before touching the source if
    /// either side is zero or too large, `PixelSourceFailure` if the source
    /// fails at any coordinate, and `CompressionFailure` if zlib does.
    pub fn encode<S>(&self, width: u32, height: u32, source: &S) -> Result<Vec<u8>, EncodeError>
    where
        S: PixelSource + ?Sized,
    {
        let raw = fill_scanlines(width, height, source)?;
        let compressed = self.compressor.compress(&raw)?;

        let mut out = Vec::with_capacity(
            SIGNATURE.len()
                + (IHDR_LEN + CHUNK_OVERHEAD)
                + (compressed.len() + CHUNK_OVERHEAD)
                + IEND_CHUNK.len(),
        );
        out.extend_from_slice(&SIGNATURE);
        write_chunk(&mut out, self.table, ChunkType::IHDR, &ihdr_payload(width, height))?;
        write_chunk(&mut out, self.table, ChunkType::IDAT, compressed.as_bytes())?;
        out.extend_from_slice(&IEND_CHUNK);

        debug!(
            "encoded {width}x{height}: {} raw bytes, {} compressed, {} total",
            raw.len(),
            compressed.len(),
            out.len()
        );
        Ok(out)
    }
}

/// Encodes with the default encoder (shared CRC table, zlib level 6).
pub fn encode_image<S>(width: u32, height: u32, source: &S) -> Result<Vec<u8>, EncodeError>
where
    S: PixelSource + ?Sized,
{
    Encoder::default().encode(width, height, source)
}

/// Bytes per scanline including the leading filter byte.
pub fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_add(1)
}

/// Validates dimensions and returns `(row stride, total scanline bytes)`.
pub fn scanline_layout(width: u32, height: u32) -> Result<(usize, usize), EncodeError> {
    let invalid = || EncodeError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(invalid());
    }
    let stride = row_stride(width).ok_or_else(invalid)?;
    let total = stride
        .checked_mul(height as usize)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(invalid)?;
    Ok((stride, total))
}

/// Builds the filter-prefixed scanline buffer for `source`.
pub fn fill_scanlines<S>(width: u32, height: u32, source: &S) -> Result<Vec<u8>, EncodeError>
where
    S: PixelSource + ?Sized,
{
    let (stride, total) = scanline_layout(width, height)?;
    let mut raw = Vec::new();
    raw.try_reserve_exact(total)
        .map_err(|_| EncodeError::InvalidDimensions { width, height })?;
    raw.resize(total, 0);

    for (y, row) in raw.chunks_exact_mut(stride).enumerate() {
        let y = y as u32;
        row[0] = FILTER_NONE;
        for (x, px) in row[1..].chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let x = x as u32;
            let color = source
                .pixel(x, y)
                .map_err(|e| EncodeError::PixelSourceFailure {
                    x,
                    y,
                    reason: e.to_string(),
                })?;
            px.copy_from_slice(&color.to_bytes());
        }
    }

    Ok(raw)
}

/// IHDR payload: width, height, depth 8, color type 2, then three zero method bytes.
pub fn ihdr_payload(width: u32, height: u32) -> [u8; IHDR_LEN] {
    let mut p = [0u8; IHDR_LEN];
    p[0..4].copy_from_slice(&width.to_be_bytes());
    p[4..8].copy_from_slice(&height.to_be_bytes());
    p[8] = BIT_DEPTH;
    p[9] = COLOR_TYPE_RGB;
    // compression, filter, interlace
    p[10] = 0;
    p[11] = 0;
    p[12] = 0;
    p
}
