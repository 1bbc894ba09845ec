//! iNES cartridge loading and mapper implementations for famicore.
//!
//! Mappers translate addresses; the [`Cartridge`] owns the PRG/CHR
//! memories and routes reads and writes through its mapper.
//!
//! # Supported mappers
//!
//! | Mapper | Name | Notes |
//! |--------|------|-------|
//! | 0 | NROM | no banking |
//! | 2 | UxROM | switchable 16 KiB PRG window |
//! | 4 | MMC3 | full banking, mirroring control, scanline IRQ |
//! | 64 | RAMBO-1 | MMC3-superset banking; IRQ stubbed |
//! | 66 | GxROM | 32 KiB PRG + 8 KiB CHR banks |
//!
//! # Example
//!
//! ```no_run
//! use famicore_mappers::Cartridge;
//!
//! let image = std::fs::read("game.nes").expect("read image");
//! let cart = Cartridge::from_bytes(&image).expect("parse cartridge");
//! let reset_lo = cart.cpu_read(0xFFFC);
//! ```

mod cartridge;
mod gxrom;
mod mapper;
mod mmc3;
mod nrom;
mod rambo1;
mod rom;
mod uxrom;

pub use cartridge::Cartridge;
pub use gxrom::Gxrom;
pub use mapper::{Mapper, Mirroring, PrgTarget};
pub use mmc3::Mmc3;
pub use nrom::Nrom;
pub use rambo1::Rambo1;
pub use rom::{Rom, RomError, RomHeader, CHR_BANK_SIZE, PRG_BANK_SIZE};
pub use uxrom::Uxrom;

/// Work RAM size behind mappers that provide a $6000-$7FFF window.
pub const PRG_RAM_SIZE: usize = 8 * 1024;
/// CHR-RAM size allocated when a cartridge ships without CHR-ROM.
pub const CHR_RAM_SIZE: usize = 8 * 1024;

/// Instantiate the mapper named by a header.
///
/// # Errors
///
/// [`RomError::UnsupportedMapper`] for ids outside the supported set.
pub fn create_mapper(header: &RomHeader) -> Result<Box<dyn Mapper>, RomError> {
    let prg = header.prg_banks;
    let chr = header.chr_banks;
    match header.mapper_id {
        0 => Ok(Box::new(Nrom::new(prg, chr))),
        2 => Ok(Box::new(Uxrom::new(prg, chr))),
        4 => Ok(Box::new(Mmc3::new(prg, chr))),
        64 => Ok(Box::new(Rambo1::new(prg, chr))),
        66 => Ok(Box::new(Gxrom::new(prg, chr))),
        id => Err(RomError::UnsupportedMapper(id)),
    }
}

/// Mapper ids this crate implements.
#[must_use]
pub fn supported_mappers() -> &'static [u16] {
    &[0, 2, 4, 64, 66]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(mapper_id: u16) -> RomHeader {
        RomHeader {
            prg_banks: 2,
            chr_banks: 1,
            mapper_id,
            mirroring: Mirroring::Horizontal,
            has_battery: false,
            has_trainer: false,
            prg_ram_size: 0,
            nes2: false,
        }
    }

    #[test]
    fn factory_covers_the_supported_set() {
        for &id in supported_mappers() {
            let mapper = create_mapper(&header(id)).unwrap();
            assert_eq!(mapper.id(), id);
        }
    }

    #[test]
    fn factory_rejects_everything_else() {
        for id in [1, 3, 5, 7, 65, 100, 255] {
            assert!(matches!(
                create_mapper(&header(id)),
                Err(RomError::UnsupportedMapper(_))
            ));
        }
    }

    #[test]
    fn mapper_names() {
        assert_eq!(create_mapper(&header(0)).unwrap().name(), "NROM");
        assert_eq!(create_mapper(&header(4)).unwrap().name(), "MMC3");
        assert_eq!(create_mapper(&header(64)).unwrap().name(), "RAMBO-1");
    }
}
