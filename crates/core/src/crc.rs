//! CRC-32 as used by PNG chunks (ISO 3309 / ITU-T V.42, PNG Annex D).
//!
//! The lookup table is built by a `const fn`, so [`PNG_CRC`] is fully
//! initialized at compile time and can be shared across threads without any
//! runtime initialization step.

/// Reflected form of the CRC-32 polynomial `0x04C11DB7`.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Process-wide CRC table. Read-only for the lifetime of the program.
pub static PNG_CRC: CrcTable = CrcTable::new();

/// Precomputed 256-entry table mapping a byte to its partial CRC-32 remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcTable {
    entries: [u32; 256],
}

impl CrcTable {
    /// Builds the table for [`POLYNOMIAL`].
    pub const fn new() -> Self {
        let mut entries = [0u32; 256];
        let mut n = 0;
        while n < 256 {
            let mut c = n as u32;
            let mut k = 0;
            while k < 8 {
                c = if c & 1 != 0 { POLYNOMIAL ^ (c >> 1) } else { c >> 1 };
                k += 1;
            }
            entries[n] = c;
            n += 1;
        }
        Self { entries }
    }

    /// Returns the table entry for `byte`.
    pub fn entry(&self, byte: u8) -> u32 {
        self.entries[byte as usize]
    }

    /// Starts an incremental checksum backed by this table.
    pub fn hasher(&self) -> Crc32<'_> {
        Crc32 {
            table: self,
            register: 0xFFFF_FFFF,
        }
    }

    /// Computes the CRC-32 of `bytes` in one call.
    pub fn checksum(&self, bytes: &[u8]) -> u32 {
        let mut crc = self.hasher();
        crc.update(bytes);
        crc.finalize()
    }
}

impl Default for CrcTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Running CRC-32 register.
///
/// Feeding `a` then `b` yields the same result as feeding `a ‖ b`, which lets
/// chunk framing checksum the type tag and payload without concatenating them.
#[derive(Debug, Clone)]
pub struct Crc32<'a> {
    table: &'a CrcTable,
    register: u32,
}

impl Crc32<'_> {
    /// Consumes `bytes` into the register.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut reg = self.register;
        for &b in bytes {
            reg = self.table.entries[((reg ^ b as u32) & 0xFF) as usize] ^ (reg >> 8);
        }
        self.register = reg;
    }

    /// Returns the final checksum (complement of the register).
    pub fn finalize(self) -> u32 {
        !self.register
    }
}

/// CRC-32 of `bytes` using the shared [`PNG_CRC`] table.
pub fn checksum(bytes: &[u8]) -> u32 {
    PNG_CRC.checksum(bytes)
}
