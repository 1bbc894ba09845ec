//! iNES cartridge image parsing.
//!
//! The 16-byte header identifies cartridge geometry and the mapper id:
//!
//! ```text
//! Byte 0-3: "NES\x1A"
//! Byte 4:   PRG-ROM size in 16 KiB units
//! Byte 5:   CHR-ROM size in 8 KiB units (0 means CHR-RAM)
//! Byte 6:   mirroring (bit 0), battery (bit 1), trainer (bit 2),
//!           mapper id low nibble (bits 4-7)
//! Byte 7:   mapper id high nibble (bits 4-7); bits 2-3 == 10 marks NES 2.0
//! Byte 8:   PRG-RAM size in 8 KiB units
//! Byte 9-15: TV system flags and padding
//! ```
//!
//! NES 2.0 images are accepted and read with iNES 1.0 semantics.

use log::debug;

use crate::mapper::Mirroring;

/// Size of one PRG bank in bytes.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// Size of one CHR bank in bytes.
pub const CHR_BANK_SIZE: usize = 8 * 1024;
/// Size of the optional trainer blob.
const TRAINER_SIZE: usize = 512;

/// Cartridge image parse failures. All of these are fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RomError {
    /// The file cannot even hold a header.
    #[error("cartridge image too small: {0} bytes, header needs 16")]
    TooSmall(usize),

    /// The magic number is not `NES\x1A`.
    #[error("bad iNES magic: {0:02X?}")]
    BadMagic([u8; 4]),

    /// The file is shorter than the header promises.
    #[error("truncated cartridge image: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the header geometry requires.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// The mapper id has no implementation.
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u16),
}

/// Parsed iNES header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomHeader {
    /// PRG-ROM bank count (16 KiB units).
    pub prg_banks: u8,
    /// CHR-ROM bank count (8 KiB units); 0 means the cartridge carries
    /// CHR-RAM instead.
    pub chr_banks: u8,
    /// Mapper id assembled from the two header nibbles.
    pub mapper_id: u16,
    /// Hard-wired nametable mirroring.
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM flag.
    pub has_battery: bool,
    /// 512-byte trainer present before PRG data.
    pub has_trainer: bool,
    /// PRG-RAM size in 8 KiB units (0 reads as 1 for compatibility).
    pub prg_ram_size: u8,
    /// File carries the NES 2.0 signature (read as iNES regardless).
    pub nes2: bool,
}

impl RomHeader {
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

    /// Parse the first 16 bytes of a cartridge image.
    ///
    /// # Errors
    ///
    /// [`RomError::TooSmall`] or [`RomError::BadMagic`].
    pub fn parse(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < 16 {
            return Err(RomError::TooSmall(data.len()));
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != Self::MAGIC {
            return Err(RomError::BadMagic(magic));
        }

        let mapper1 = data[6];
        let mapper2 = data[7];

        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper_id: u16::from((mapper2 & 0xF0) | (mapper1 >> 4)),
            mirroring: if mapper1 & 0x01 != 0 {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
            has_battery: mapper1 & 0x02 != 0,
            has_trainer: mapper1 & 0x04 != 0,
            prg_ram_size: data[8],
            nes2: mapper2 & 0x0C == 0x08,
        })
    }
}

/// A loaded cartridge image: header plus raw PRG and CHR payloads.
#[derive(Debug, Clone)]
pub struct Rom {
    /// Parsed header.
    pub header: RomHeader,
    /// Optional 512-byte trainer blob, kept but unused.
    pub trainer: Option<Vec<u8>>,
    /// PRG-ROM payload, `prg_banks` x 16 KiB.
    pub prg_rom: Vec<u8>,
    /// CHR-ROM payload, `chr_banks` x 8 KiB. Empty when the cartridge uses
    /// CHR-RAM.
    pub chr_rom: Vec<u8>,
}

impl Rom {
    /// Parse a whole cartridge image.
    ///
    /// # Errors
    ///
    /// Any [`RomError`] other than `UnsupportedMapper`, which is deferred
    /// until a mapper is instantiated.
    pub fn load(data: &[u8]) -> Result<Self, RomError> {
        let header = RomHeader::parse(data)?;

        let prg_size = usize::from(header.prg_banks) * PRG_BANK_SIZE;
        let chr_size = usize::from(header.chr_banks) * CHR_BANK_SIZE;
        let trainer_size = if header.has_trainer { TRAINER_SIZE } else { 0 };

        let expected = 16 + trainer_size + prg_size + chr_size;
        if data.len() < expected {
            return Err(RomError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let mut offset = 16;
        let trainer = if header.has_trainer {
            let blob = data[offset..offset + TRAINER_SIZE].to_vec();
            offset += TRAINER_SIZE;
            Some(blob)
        } else {
            None
        };

        let prg_rom = data[offset..offset + prg_size].to_vec();
        offset += prg_size;
        let chr_rom = data[offset..offset + chr_size].to_vec();

        debug!(
            "cartridge: mapper {:03}, {} x 16K PRG, {} x 8K CHR{}, {:?} mirroring",
            header.mapper_id,
            header.prg_banks,
            header.chr_banks,
            if header.chr_banks == 0 { " (CHR-RAM)" } else { "" },
            header.mirroring,
        );

        Ok(Self {
            header,
            trainer,
            prg_rom,
            chr_rom,
        })
    }
}
