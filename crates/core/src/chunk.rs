//! PNG chunk framing.
//!
//! A chunk on disk is `length ‖ type ‖ payload ‖ crc`, where `length` counts
//! only the payload and `crc` covers `type ‖ payload`. Both integers are
//! big-endian.

use crate::crc::CrcTable;
use crate::error::EncodeError;
use std::fmt;

/// Bytes of framing around every payload: length, type and CRC fields.
pub const CHUNK_OVERHEAD: usize = 12;

/// A 4-byte chunk type tag such as `IHDR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    /// Image header.
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Image data.
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image trailer.
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Validates a raw tag. Each byte must be an ASCII letter.
    /// Accepts four ASCII letters whose third (reserved) letter is uppercase.
    pub fn new(tag: [u8; 4]) -> Result<Self, EncodeError> {
        if tag.iter().all(u8::is_ascii_alphabetic) && tag[2].is_ascii_uppercase() {
            Ok(ChunkType(tag))
        } else {
            Err(EncodeError::InvalidChunkType(tag))
        }
    }

    pub fn bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Critical chunks have an uppercase first letter.
    pub fn is_critical(&self) -> bool {
        self.0[0].is_ascii_uppercase()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Validated tags are ASCII, so this never loses information.
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// A chunk ready to be framed: a type tag and a borrowed payload.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    kind: ChunkType,
    payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Pairs a tag with its payload, rejecting payloads the length field
    /// cannot describe.
    pub fn new(kind: ChunkType, payload: &'a [u8]) -> Result<Self, EncodeError> {
        check_length(payload.len())?;
        Ok(Self { kind, payload })
    }

    pub fn kind(&self) -> ChunkType {
        self.kind
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Value of the length field. Always the physical payload length.
    pub fn length(&self) -> u32 {
        // Checked in `new`.
        self.payload.len() as u32
    }

    /// CRC-32 over exactly `type ‖ payload`.
    pub fn crc(&self, table: &CrcTable) -> u32 {
        let mut crc = table.hasher();
        crc.update(self.kind.bytes());
        crc.update(self.payload);
        crc.finalize()
    }

    /// Size of the framed chunk in bytes.
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + CHUNK_OVERHEAD
    }

    /// Appends the framed chunk to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>, table: &CrcTable) {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&self.length().to_be_bytes());
        out.extend_from_slice(self.kind.bytes());
        out.extend_from_slice(self.payload);
        out.extend_from_slice(&self.crc(table).to_be_bytes());
    }
}

/// Frames `payload` as a standalone chunk.
pub fn build_chunk(
    table: &CrcTable,
    kind: ChunkType,
    payload: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    let chunk = Chunk::new(kind, payload)?;
    let mut out = Vec::with_capacity(chunk.encoded_len());
    chunk.write_to(&mut out, table);
    Ok(out)
}

/// Appends a framed chunk to `out`.
pub fn write_chunk(
    out: &mut Vec<u8>,
    table: &CrcTable,
    kind: ChunkType,
    payload: &[u8],
) -> Result<(), EncodeError> {
    Chunk::new(kind, payload)?.write_to(out, table);
    Ok(())
}

fn check_length(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge(len))
}
