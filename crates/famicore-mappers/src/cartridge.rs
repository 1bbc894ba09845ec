//! The cartridge: PRG/CHR memories plus the mapper that addresses them.
//!
//! All accesses go through the mapper's translation; `None`/`false` returns
//! mean the cartridge did not claim the address and the bus should fall
//! through to its other devices.

use crate::mapper::{Mapper, Mirroring, PrgTarget};
use crate::rom::{Rom, RomError};
use crate::{create_mapper, CHR_RAM_SIZE, PRG_RAM_SIZE};

/// A loaded cartridge.
pub struct Cartridge {
    prg_rom: Vec<u8>,
    /// CHR-ROM, or 8 KiB of CHR-RAM when the header says `chr_banks == 0`.
    chr: Vec<u8>,
    /// Work RAM window ($6000-$7FFF where the mapper provides one).
    prg_ram: Vec<u8>,
    header_mirroring: Mirroring,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Build a cartridge from a parsed image.
    ///
    /// # Errors
    ///
    /// [`RomError::UnsupportedMapper`] when the image names a mapper outside
    /// the supported set.
    pub fn new(rom: Rom) -> Result<Self, RomError> {
        let mapper = create_mapper(&rom.header)?;
        let chr = if rom.header.chr_banks == 0 {
            vec![0; CHR_RAM_SIZE]
        } else {
            rom.chr_rom
        };

        Ok(Self {
            prg_rom: rom.prg_rom,
            chr,
            prg_ram: vec![0; PRG_RAM_SIZE],
            header_mirroring: rom.header.mirroring,
            mapper,
        })
    }

    /// Parse raw image bytes and build the cartridge in one step.
    ///
    /// # Errors
    ///
    /// Any [`RomError`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, RomError> {
        Self::new(Rom::load(data)?)
    }

    /// CPU-side read. `None` when the cartridge does not claim the address.
    #[must_use]
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        match self.mapper.cpu_map_read(addr)? {
            PrgTarget::Rom(offset) => Some(self.prg_rom.get(offset).copied().unwrap_or(0)),
            PrgTarget::Ram(offset) => Some(self.prg_ram.get(offset).copied().unwrap_or(0)),
        }
    }

    /// CPU-side write. Returns true when the cartridge claimed the address
    /// (including writes consumed as bank-switch commands).
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.cpu_map_write(addr, data) {
            Some(PrgTarget::Ram(offset)) => {
                if let Some(byte) = self.prg_ram.get_mut(offset) {
                    *byte = data;
                }
                true
            }
            // ROM is not writable; the claim still terminates decoding.
            Some(PrgTarget::Rom(_)) => true,
            None => addr >= 0x8000,
        }
    }

    /// PPU-side pattern table read.
    #[must_use]
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        let offset = self.mapper.ppu_map_read(addr)?;
        Some(self.chr.get(offset).copied().unwrap_or(0))
    }

    /// PPU-side pattern table write (CHR-RAM only). True when claimed.
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.ppu_map_write(addr) {
            Some(offset) => {
                if let Some(byte) = self.chr.get_mut(offset) {
                    *byte = data;
                }
                true
            }
            None => false,
        }
    }

    /// Effective nametable mirroring: mapper override or header wiring.
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring().unwrap_or(self.header_mirroring)
    }

    /// True while the mapper asserts IRQ.
    #[must_use]
    pub fn irq_pending(&self) -> bool {
        self.mapper.irq_pending()
    }

    /// Acknowledge the mapper IRQ.
    pub fn irq_clear(&mut self) {
        self.mapper.irq_clear();
    }

    /// End-of-scanline notification from the PPU.
    pub fn scanline(&mut self) {
        self.mapper.scanline();
    }

    /// Reset mapper bank state. Memories persist.
    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    /// iNES mapper id.
    #[must_use]
    pub fn mapper_id(&self) -> u16 {
        self.mapper.id()
    }

    /// Mapper board name.
    #[must_use]
    pub fn mapper_name(&self) -> &'static str {
        self.mapper.name()
    }

    /// PRG-ROM length in bytes.
    #[must_use]
    pub fn prg_len(&self) -> usize {
        self.prg_rom.len()
    }

    /// CHR length in bytes (ROM or RAM).
    #[must_use]
    pub fn chr_len(&self) -> usize {
        self.chr.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::tests::build_image;

    #[test]
    fn nrom_cartridge_reads_prg_and_chr() {
        let mut image = build_image(1, 1, 0, 0);
        image[16] = 0xAB; // first PRG byte
        image[16 + 16384] = 0xCD; // first CHR byte
        let cart = Cartridge::from_bytes(&image).unwrap();

        assert_eq!(cart.prg_len(), 16384);
        assert_eq!(cart.chr_len(), 8192);
        assert_eq!(cart.cpu_read(0x8000), Some(0xAB));
        assert_eq!(cart.cpu_read(0xC000), Some(0xAB)); // 16K mirror
        assert_eq!(cart.ppu_read(0x0000), Some(0xCD));
        assert_eq!(cart.cpu_read(0x4020), None);
    }

    #[test]
    fn chr_ram_round_trips() {
        let image = build_image(1, 0, 0, 0);
        let mut cart = Cartridge::from_bytes(&image).unwrap();

        assert!(cart.ppu_write(0x1234, 0x77));
        assert_eq!(cart.ppu_read(0x1234), Some(0x77));
    }

    #[test]
    fn chr_rom_write_is_rejected() {
        let image = build_image(1, 1, 0, 0);
        let mut cart = Cartridge::from_bytes(&image).unwrap();

        assert!(!cart.ppu_write(0x0000, 0x77));
        assert_eq!(cart.ppu_read(0x0000), Some(0x00));
    }

    #[test]
    fn unsupported_mapper_fails_fast() {
        let image = build_image(1, 1, 7, 0);
        assert!(matches!(
            Cartridge::from_bytes(&image),
            Err(RomError::UnsupportedMapper(7))
        ));
    }

    #[test]
    fn uxrom_bank_switch_through_cartridge() {
        let mut image = build_image(4, 0, 2, 0);
        // Tag the first byte of each 16K bank with its index.
        for bank in 0..4 {
            image[16 + bank * 16384] = bank as u8 + 1;
        }
        let mut cart = Cartridge::from_bytes(&image).unwrap();

        assert_eq!(cart.cpu_read(0x8000), Some(1));
        assert_eq!(cart.cpu_read(0xC000), Some(4)); // fixed last bank
        assert!(cart.cpu_write(0x8000, 2));
        assert_eq!(cart.cpu_read(0x8000), Some(3));
    }

    #[test]
    fn mmc3_work_ram() {
        let image = build_image(2, 1, 4, 0);
        let mut cart = Cartridge::from_bytes(&image).unwrap();

        assert!(cart.cpu_write(0x6000, 0x5A));
        assert_eq!(cart.cpu_read(0x6000), Some(0x5A));

        // Write-protect keeps the old contents; disable drops the window.
        cart.cpu_write(0xA001, 0xC0);
        cart.cpu_write(0x6000, 0x99);
        assert_eq!(cart.cpu_read(0x6000), Some(0x5A));

        cart.cpu_write(0xA001, 0x00);
        assert_eq!(cart.cpu_read(0x6000), None);
    }

    #[test]
    fn mmc3_mirroring_override() {
        let image = build_image(2, 1, 4, 0x01); // header says vertical
        let mut cart = Cartridge::from_bytes(&image).unwrap();

        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        cart.cpu_write(0xA000, 0x01);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }
}
