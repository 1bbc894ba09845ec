//! The mapper trait: cartridge-side address translation.
//!
//! Mappers translate CPU and PPU addresses into offsets inside the
//! cartridge's PRG and CHR memories, and capture writes into the ROM region
//! as bank-switch commands. They never own the memories themselves; a `None`
//! return means the address is not claimed and decoding falls through.

/// Nametable mirroring arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// $2000/$2400 share a bank, $2800/$2C00 share the other.
    #[default]
    Horizontal,
    /// $2000/$2800 share a bank, $2400/$2C00 share the other.
    Vertical,
    /// All four nametables map to the first bank.
    SingleScreenLow,
    /// All four nametables map to the second bank.
    SingleScreenHigh,
}

/// Where a translated CPU access lands inside the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrgTarget {
    /// Offset into PRG-ROM.
    Rom(usize),
    /// Offset into cartridge work RAM ($6000-$7FFF on MMC3-class boards).
    Ram(usize),
}

/// Cartridge address translation and bank-switch state.
pub trait Mapper: Send {
    /// Translate a CPU read. `None` means the address is not claimed.
    fn cpu_map_read(&self, addr: u16) -> Option<PrgTarget>;

    /// Translate a CPU write, or capture it as a bank-switch command
    /// (returning `None` after mutating internal state).
    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<PrgTarget>;

    /// Translate a PPU pattern-table read into a CHR offset.
    fn ppu_map_read(&self, addr: u16) -> Option<usize>;

    /// Translate a PPU pattern-table write. `None` when CHR is ROM.
    fn ppu_map_write(&self, addr: u16) -> Option<usize>;

    /// Mirroring override; `None` defers to the header's hard wiring.
    fn mirroring(&self) -> Option<Mirroring> {
        None
    }

    /// True while the mapper is asserting IRQ.
    fn irq_pending(&self) -> bool {
        false
    }

    /// Acknowledge the asserted IRQ.
    fn irq_clear(&mut self) {}

    /// End-of-scanline notification from the PPU while rendering.
    fn scanline(&mut self) {}

    /// Return bank-switch state to power-on defaults.
    fn reset(&mut self) {}

    /// iNES mapper id.
    fn id(&self) -> u16;

    /// Conventional board name.
    fn name(&self) -> &'static str;
}
