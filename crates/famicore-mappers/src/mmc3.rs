//! Mapper 4: MMC3. Fine-grained banking plus a scanline IRQ counter.
//!
//! Register pairs decode from the address: even/odd writes inside $8000,
//! $A000, $C000, and $E000 ranges. Eight bank registers feed two 2 KiB and
//! four 1 KiB CHR windows (swappable across the pattern tables by the
//! inversion bit) and two 8 KiB PRG windows (swappable against the
//! fixed second-to-last bank by the PRG mode bit). 8 KiB of work RAM sits
//! at $6000-$7FFF, gated by the enable and write-protect bits of $A001.
//!
//! The IRQ counter reloads from its latch and decrements once per rendered
//! scanline; hitting zero with IRQ enabled asserts the interrupt line until
//! acknowledged or disabled.

use crate::mapper::{Mapper, Mirroring, PrgTarget};

const PRG_BANK_8K: usize = 8 * 1024;
const CHR_BANK_1K: usize = 1024;

/// MMC3 mapper state.
#[derive(Debug, Clone)]
pub struct Mmc3 {
    /// Total 8 KiB PRG banks.
    prg_banks_8k: usize,
    /// Total 1 KiB CHR banks.
    chr_banks_1k: usize,
    chr_is_ram: bool,

    bank_select: u8,
    prg_mode: bool,
    chr_inversion: bool,
    /// R0-R7: two 2 KiB CHR banks, four 1 KiB CHR banks, two PRG banks.
    registers: [u8; 8],

    mirroring: Mirroring,
    prg_ram_enabled: bool,
    prg_ram_protect: bool,

    irq_latch: u8,
    irq_counter: u8,
    irq_reload: bool,
    irq_enabled: bool,
    irq_pending: bool,
}

impl Mmc3 {
    /// Create an MMC3 mapper for the given header bank counts
    /// (16 KiB PRG units, 8 KiB CHR units).
    #[must_use]
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        let chr_is_ram = chr_banks == 0;
        Self {
            prg_banks_8k: usize::from(prg_banks.max(1)) * 2,
            chr_banks_1k: if chr_is_ram {
                8
            } else {
                usize::from(chr_banks) * 8
            },
            chr_is_ram,
            bank_select: 0,
            prg_mode: false,
            chr_inversion: false,
            registers: [0, 2, 4, 5, 6, 7, 0, 1],
            mirroring: Mirroring::Vertical,
            prg_ram_enabled: true,
            prg_ram_protect: false,
            irq_latch: 0,
            irq_counter: 0,
            irq_reload: false,
            irq_enabled: false,
            irq_pending: false,
        }
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let second_last = self.prg_banks_8k - 2;
        let bank = match addr {
            0x8000..=0x9FFF => {
                if self.prg_mode {
                    second_last
                } else {
                    usize::from(self.registers[6])
                }
            }
            0xA000..=0xBFFF => usize::from(self.registers[7]),
            0xC000..=0xDFFF => {
                if self.prg_mode {
                    usize::from(self.registers[6])
                } else {
                    second_last
                }
            }
            _ => self.prg_banks_8k - 1,
        };
        (bank % self.prg_banks_8k) * PRG_BANK_8K + usize::from(addr & 0x1FFF)
    }

    fn chr_offset(&self, addr: u16) -> usize {
        // Inversion swaps the two pattern tables; folding it into the
        // address keeps one bank map.
        let addr = if self.chr_inversion {
            (addr & 0x1FFF) ^ 0x1000
        } else {
            addr & 0x1FFF
        };

        let bank = match addr {
            0x0000..=0x07FF => usize::from(self.registers[0] & 0xFE) + usize::from(addr >= 0x0400),
            0x0800..=0x0FFF => usize::from(self.registers[1] & 0xFE) + usize::from(addr >= 0x0C00),
            0x1000..=0x13FF => usize::from(self.registers[2]),
            0x1400..=0x17FF => usize::from(self.registers[3]),
            0x1800..=0x1BFF => usize::from(self.registers[4]),
            _ => usize::from(self.registers[5]),
        };
        (bank % self.chr_banks_1k) * CHR_BANK_1K + usize::from(addr & 0x03FF)
    }
}

impl Mapper for Mmc3 {
    fn cpu_map_read(&self, addr: u16) -> Option<PrgTarget> {
        match addr {
            0x6000..=0x7FFF => self
                .prg_ram_enabled
                .then(|| PrgTarget::Ram(usize::from(addr & 0x1FFF))),
            0x8000..=0xFFFF => Some(PrgTarget::Rom(self.prg_offset(addr))),
            _ => None,
        }
    }

    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<PrgTarget> {
        match addr {
            0x6000..=0x7FFF => {
                return (self.prg_ram_enabled && !self.prg_ram_protect)
                    .then(|| PrgTarget::Ram(usize::from(addr & 0x1FFF)))
            }
            0x8000..=0x9FFF => {
                if addr & 0x0001 == 0 {
                    self.bank_select = data & 0x07;
                    self.prg_mode = data & 0x40 != 0;
                    self.chr_inversion = data & 0x80 != 0;
                } else {
                    let index = usize::from(self.bank_select);
                    self.registers[index] = if index >= 6 { data & 0x3F } else { data };
                }
            }
            0xA000..=0xBFFF => {
                if addr & 0x0001 == 0 {
                    self.mirroring = if data & 0x01 != 0 {
                        Mirroring::Horizontal
                    } else {
                        Mirroring::Vertical
                    };
                } else {
                    // PRG-RAM protect ($A001)
                    self.prg_ram_enabled = data & 0x80 != 0;
                    self.prg_ram_protect = data & 0x40 != 0;
                }
            }
            0xC000..=0xDFFF => {
                if addr & 0x0001 == 0 {
                    self.irq_latch = data;
                } else {
                    self.irq_counter = 0;
                    self.irq_reload = true;
                }
            }
            0xE000..=0xFFFF => {
                if addr & 0x0001 == 0 {
                    self.irq_enabled = false;
                    self.irq_pending = false;
                } else {
                    self.irq_enabled = true;
                }
            }
            _ => {}
        }
        None
    }

    fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF).then(|| self.chr_offset(addr))
    }

    fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF && self.chr_is_ram).then(|| self.chr_offset(addr))
    }

    fn mirroring(&self) -> Option<Mirroring> {
        Some(self.mirroring)
    }

    fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    fn irq_clear(&mut self) {
        self.irq_pending = false;
    }

    fn scanline(&mut self) {
        if self.irq_counter == 0 || self.irq_reload {
            self.irq_counter = self.irq_latch;
            self.irq_reload = false;
        } else {
            self.irq_counter -= 1;
        }

        if self.irq_counter == 0 && self.irq_enabled {
            self.irq_pending = true;
        }
    }

    fn reset(&mut self) {
        self.bank_select = 0;
        self.prg_mode = false;
        self.chr_inversion = false;
        self.registers = [0, 2, 4, 5, 6, 7, 0, 1];
        self.prg_ram_enabled = true;
        self.prg_ram_protect = false;
        self.irq_latch = 0;
        self.irq_counter = 0;
        self.irq_reload = false;
        self.irq_enabled = false;
        self.irq_pending = false;
    }

    fn id(&self) -> u16 {
        4
    }

    fn name(&self) -> &'static str {
        "MMC3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 128 KiB PRG (16 x 8K), 128 KiB CHR (128 x 1K).
    fn mapper() -> Mmc3 {
        Mmc3::new(8, 16)
    }

    fn select(mapper: &mut Mmc3, register: u8, value: u8) {
        mapper.cpu_map_write(0x8000, register);
        mapper.cpu_map_write(0x8001, value);
    }

    #[test]
    fn prg_mode_swaps_windows() {
        let mut m = mapper();
        select(&mut m, 6, 3);
        select(&mut m, 7, 5);

        // Mode 0: $8000 = R6, $C000 = second-to-last
        assert_eq!(m.cpu_map_read(0x8000), Some(PrgTarget::Rom(3 * PRG_BANK_8K)));
        assert_eq!(m.cpu_map_read(0xA000), Some(PrgTarget::Rom(5 * PRG_BANK_8K)));
        assert_eq!(
            m.cpu_map_read(0xC000),
            Some(PrgTarget::Rom(14 * PRG_BANK_8K))
        );
        assert_eq!(
            m.cpu_map_read(0xE000),
            Some(PrgTarget::Rom(15 * PRG_BANK_8K))
        );

        // Mode 1 swaps $8000 and $C000
        m.cpu_map_write(0x8000, 0x46);
        m.cpu_map_write(0x8001, 3);
        assert_eq!(
            m.cpu_map_read(0x8000),
            Some(PrgTarget::Rom(14 * PRG_BANK_8K))
        );
        assert_eq!(m.cpu_map_read(0xC000), Some(PrgTarget::Rom(3 * PRG_BANK_8K)));
    }

    #[test]
    fn chr_banking_and_inversion() {
        let mut m = mapper();
        select(&mut m, 0, 0x11); // 2K window, low bit dropped
        select(&mut m, 2, 0x20);

        assert_eq!(m.ppu_map_read(0x0000), Some(0x10 * CHR_BANK_1K));
        assert_eq!(m.ppu_map_read(0x0400), Some(0x11 * CHR_BANK_1K));
        assert_eq!(m.ppu_map_read(0x1000), Some(0x20 * CHR_BANK_1K));

        // Inversion swaps pattern tables
        m.cpu_map_write(0x8000, 0x80);
        assert_eq!(m.ppu_map_read(0x1000), Some(0x10 * CHR_BANK_1K));
        assert_eq!(m.ppu_map_read(0x0000), Some(0x20 * CHR_BANK_1K));
    }

    #[test]
    fn work_ram_window() {
        let mut m = mapper();
        assert_eq!(m.cpu_map_read(0x6000), Some(PrgTarget::Ram(0)));
        assert_eq!(m.cpu_map_read(0x7FFF), Some(PrgTarget::Ram(0x1FFF)));
        assert_eq!(m.cpu_map_write(0x6123, 0xAA), Some(PrgTarget::Ram(0x0123)));
    }

    #[test]
    fn work_ram_enable_and_protect_gating() {
        let mut m = mapper();

        // Disabled: neither side of the window is claimed.
        m.cpu_map_write(0xA001, 0x00);
        assert_eq!(m.cpu_map_read(0x6000), None);
        assert_eq!(m.cpu_map_write(0x6000, 0xAA), None);

        // Enabled and write-protected: reads work, writes are refused.
        m.cpu_map_write(0xA001, 0xC0);
        assert_eq!(m.cpu_map_read(0x6000), Some(PrgTarget::Ram(0)));
        assert_eq!(m.cpu_map_write(0x6000, 0xAA), None);

        // Fully enabled again.
        m.cpu_map_write(0xA001, 0x80);
        assert_eq!(m.cpu_map_write(0x6000, 0xAA), Some(PrgTarget::Ram(0)));

        // Reset restores the power-on state.
        m.cpu_map_write(0xA001, 0x00);
        m.reset();
        assert_eq!(m.cpu_map_read(0x6000), Some(PrgTarget::Ram(0)));
    }

    #[test]
    fn mirroring_register() {
        let mut m = mapper();
        assert_eq!(m.mirroring(), Some(Mirroring::Vertical));
        m.cpu_map_write(0xA000, 0x01);
        assert_eq!(m.mirroring(), Some(Mirroring::Horizontal));
        m.cpu_map_write(0xA000, 0x00);
        assert_eq!(m.mirroring(), Some(Mirroring::Vertical));
    }

    #[test]
    fn irq_counts_scanlines() {
        let mut m = mapper();
        m.cpu_map_write(0xC000, 3); // latch
        m.cpu_map_write(0xC001, 0); // reload
        m.cpu_map_write(0xE001, 0); // enable

        m.scanline(); // reload to 3
        m.scanline(); // 2
        m.scanline(); // 1
        assert!(!m.irq_pending());
        m.scanline(); // 0 -> assert
        assert!(m.irq_pending());

        m.irq_clear();
        assert!(!m.irq_pending());
        // Counter reloads and runs again
        m.scanline(); // reload to 3
        m.scanline();
        m.scanline();
        m.scanline();
        assert!(m.irq_pending());
    }

    #[test]
    fn irq_disable_acknowledges() {
        let mut m = mapper();
        m.cpu_map_write(0xC000, 0);
        m.cpu_map_write(0xC001, 0);
        m.cpu_map_write(0xE001, 0);
        m.scanline();
        assert!(m.irq_pending());

        m.cpu_map_write(0xE000, 0);
        assert!(!m.irq_pending());
        m.scanline();
        assert!(!m.irq_pending());
    }
}
