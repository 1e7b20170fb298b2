#![deny(unsafe_code)]
//! Core PNG encoder for gradient-png.
//!
//! Provides the CRC-32 table (`CrcTable`, `PNG_CRC`), chunk framing
//! (`ChunkType`, `Chunk`, `build_chunk`), the zlib compressor seam
//! (`Compressor`, `ZlibCompressor`), and the image assembler (`Encoder`,
//! `encode_image`) that turns any `PixelSource` into an 8-bit RGB PNG.

pub mod chunk;
pub mod compress;
pub mod config;
pub mod crc;
pub mod encoder;
pub mod error;
pub mod params;
pub mod pixel;

pub use chunk::{build_chunk, write_chunk, Chunk, ChunkType};
pub use compress::{Compressed, Compressor, ZlibCompressor};
pub use config::{CompressionLevel, EncoderConfig};
pub use crc::{checksum, CrcTable, PNG_CRC};
pub use encoder::{encode_image, Encoder, SIGNATURE};
pub use error::EncodeError;
pub use pixel::{PixelSource, Rgb, Solid, SourceError};
