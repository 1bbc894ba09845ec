//! Mapper 64: Tengen RAMBO-1. An MMC3 superset.
//!
//! Bank select works like MMC3 with three differences: three PRG windows are
//! switchable (R6, R7, RF) with only $E000 fixed, the K bit turns the two
//! 2 KiB CHR windows into four 1 KiB windows fed by R8/R9, and the IRQ
//! counter has its own cycle-mode quirks. Only bank selection and mirroring
//! are implemented here; IRQ writes are accepted and logged.

use log::debug;

use crate::mapper::{Mapper, Mirroring, PrgTarget};

const PRG_BANK_8K: usize = 8 * 1024;
const CHR_BANK_1K: usize = 1024;

/// RAMBO-1 mapper state.
#[derive(Debug, Clone)]
pub struct Rambo1 {
    prg_banks_8k: usize,
    chr_banks_1k: usize,
    chr_is_ram: bool,

    bank_select: u8,
    prg_mode: bool,
    chr_mode_1k: bool,
    chr_inversion: bool,

    /// R0-R5 as on MMC3.
    chr_regs: [u8; 6],
    /// R8 and R9: extra 1 KiB banks used when the K bit is set.
    chr_extra: [u8; 2],
    /// Banks for the $8000, $A000, and $C000 windows.
    prg_slots: [u8; 3],

    mirroring: Mirroring,
}

impl Rambo1 {
    /// Create a RAMBO-1 mapper for the given header bank counts.
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
            chr_mode_1k: false,
            chr_inversion: false,
            chr_regs: [0, 2, 4, 5, 6, 7],
            chr_extra: [0, 0],
            prg_slots: [0, 1, 2],
            mirroring: Mirroring::Vertical,
        }
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let bank = match addr {
            0x8000..=0x9FFF => usize::from(self.prg_slots[0]),
            0xA000..=0xBFFF => usize::from(self.prg_slots[1]),
            0xC000..=0xDFFF => usize::from(self.prg_slots[2]),
            _ => self.prg_banks_8k - 1,
        };
        (bank % self.prg_banks_8k) * PRG_BANK_8K + usize::from(addr & 0x1FFF)
    }

    fn chr_offset(&self, addr: u16) -> usize {
        let addr = if self.chr_inversion {
            (addr & 0x1FFF) ^ 0x1000
        } else {
            addr & 0x1FFF
        };

        let bank = if self.chr_mode_1k {
            // K = 1: eight independent 1 KiB windows.
            match addr {
                0x0000..=0x03FF => usize::from(self.chr_regs[0]),
                0x0400..=0x07FF => usize::from(self.chr_extra[0]),
                0x0800..=0x0BFF => usize::from(self.chr_regs[1]),
                0x0C00..=0x0FFF => usize::from(self.chr_extra[1]),
                0x1000..=0x13FF => usize::from(self.chr_regs[2]),
                0x1400..=0x17FF => usize::from(self.chr_regs[3]),
                0x1800..=0x1BFF => usize::from(self.chr_regs[4]),
                _ => usize::from(self.chr_regs[5]),
            }
        } else {
            match addr {
                0x0000..=0x07FF => {
                    usize::from(self.chr_regs[0] & 0xFE) + usize::from(addr >= 0x0400)
                }
                0x0800..=0x0FFF => {
                    usize::from(self.chr_regs[1] & 0xFE) + usize::from(addr >= 0x0C00)
                }
                0x1000..=0x13FF => usize::from(self.chr_regs[2]),
                0x1400..=0x17FF => usize::from(self.chr_regs[3]),
                0x1800..=0x1BFF => usize::from(self.chr_regs[4]),
                _ => usize::from(self.chr_regs[5]),
            }
        };
        (bank % self.chr_banks_1k) * CHR_BANK_1K + usize::from(addr & 0x03FF)
    }

    fn write_bank_data(&mut self, data: u8) {
        match self.bank_select & 0x0F {
            r @ 0..=5 => self.chr_regs[usize::from(r)] = data,
            6 => {
                // R6 feeds $8000, or $C000 in the swapped PRG mode.
                let slot = if self.prg_mode { 2 } else { 0 };
                self.prg_slots[slot] = data;
            }
            7 => self.prg_slots[1] = data,
            8 => self.chr_extra[0] = data,
            9 => self.chr_extra[1] = data,
            15 => {
                // RF feeds $C000, or $8000 in the swapped PRG mode.
                let slot = if self.prg_mode { 0 } else { 2 };
                self.prg_slots[slot] = data;
            }
            r => debug!("RAMBO-1: write to unused bank register {r}"),
        }
    }
}

impl Mapper for Rambo1 {
    fn cpu_map_read(&self, addr: u16) -> Option<PrgTarget> {
        (addr >= 0x8000).then(|| PrgTarget::Rom(self.prg_offset(addr)))
    }

    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<PrgTarget> {
        if addr < 0x8000 {
            return None;
        }
        match (addr & 0xE000, addr & 0x0001) {
            (0x8000, 0) => {
                self.bank_select = data & 0x0F;
                self.chr_mode_1k = data & 0x20 != 0;
                self.prg_mode = data & 0x40 != 0;
                self.chr_inversion = data & 0x80 != 0;
            }
            (0x8000, _) => self.write_bank_data(data),
            (0xA000, 0) => {
                self.mirroring = if data & 0x01 != 0 {
                    Mirroring::Horizontal
                } else {
                    Mirroring::Vertical
                };
            }
            (0xC000 | 0xE000, _) => {
                // IRQ latch/reload/enable: not modeled.
                debug!("RAMBO-1: IRQ register write ${addr:04X} = {data:02X} ignored");
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

    fn reset(&mut self) {
        self.bank_select = 0;
        self.prg_mode = false;
        self.chr_mode_1k = false;
        self.chr_inversion = false;
        self.chr_regs = [0, 2, 4, 5, 6, 7];
        self.chr_extra = [0, 0];
        self.prg_slots = [0, 1, 2];
    }

    fn id(&self) -> u16 {
        64
    }

    fn name(&self) -> &'static str {
        "RAMBO-1"
    }
}
