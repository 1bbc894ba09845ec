//! The system bus: CPU-side address decode, CIRAM, controllers, OAM DMA.
//!
//! CPU address space:
//!
//! ```text
//! $0000-$1FFF  2 KiB internal RAM, mirrored every $0800
//! $2000-$3FFF  PPU registers, mirrored every 8 bytes
//! $4014        OAM DMA trigger
//! $4016        controller strobe / controller 1 serial read
//! $4017        controller 2 serial read (APU frame counter on write)
//! $4000-$4015  APU registers, register-level stub
//! $4020-$FFFF  cartridge
//! ```
//!
//! Unclaimed reads return 0, unclaimed writes are discarded.

use famicore_mappers::{Cartridge, Mirroring};
use famicore_ppu::{Ppu, PpuBus};

use crate::controller::Controller;

/// PPU-side memory view: cartridge CHR plus CIRAM with the cartridge's
/// mirroring arrangement. Borrowed from the bus for the duration of one
/// PPU access or dot.
struct PpuMemory<'a> {
    cart: &'a mut Cartridge,
    ciram: &'a mut [u8; 2048],
}

/// Fold a $2000-$3EFF nametable address onto the 2 KiB CIRAM.
fn ciram_index(mirroring: Mirroring, addr: u16) -> usize {
    let addr = usize::from(addr & 0x0FFF);
    let offset = addr & 0x03FF;
    match mirroring {
        // $2000/$2400 share the first bank, $2800/$2C00 the second.
        Mirroring::Horizontal => ((addr >> 11) & 1) * 0x400 + offset,
        // $2000/$2800 share the first bank, $2400/$2C00 the second.
        Mirroring::Vertical => ((addr >> 10) & 1) * 0x400 + offset,
        Mirroring::SingleScreenLow => offset,
        Mirroring::SingleScreenHigh => 0x400 + offset,
    }
}

impl PpuBus for PpuMemory<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if let Some(data) = self.cart.ppu_read(addr) {
            return data;
        }
        match addr {
            0x2000..=0x3EFF => self.ciram[ciram_index(self.cart.mirroring(), addr)],
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        if self.cart.ppu_write(addr, data) {
            return;
        }
        if let 0x2000..=0x3EFF = addr {
            self.ciram[ciram_index(self.cart.mirroring(), addr)] = data;
        }
    }

    fn scanline(&mut self) {
        self.cart.scanline();
    }
}

/// The machine bus. Owns everything except the CPU.
pub struct Bus {
    /// 2 KiB internal RAM.
    pub ram: [u8; 2048],
    /// PPU nametable memory (CIRAM).
    ciram: [u8; 2048],
    /// The picture processing unit.
    pub ppu: Ppu,
    /// The cartridge.
    pub cart: Cartridge,
    controllers: [Controller; 2],
    strobe: bool,

    // OAM DMA state
    dma_page: u8,
    dma_addr: u8,
    dma_data: u8,
    dma_transfer: bool,
    dma_dummy: bool,
}

impl Bus {
    /// Build a bus around a cartridge.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            ciram: [0; 2048],
            ppu: Ppu::new(),
            cart,
            controllers: [Controller::default(); 2],
            strobe: false,
            dma_page: 0,
            dma_addr: 0,
            dma_data: 0,
            dma_transfer: false,
            dma_dummy: true,
        }
    }

    /// Reset bus-side state. RAM and CIRAM are left untouched.
    pub fn reset(&mut self) {
        self.ppu.reset();
        self.cart.reset();
        self.strobe = false;
        self.dma_page = 0;
        self.dma_addr = 0;
        self.dma_data = 0;
        self.dma_transfer = false;
        self.dma_dummy = true;
    }

    /// Advance the PPU by one dot.
    pub fn tick_ppu(&mut self) {
        let mut memory = PpuMemory {
            cart: &mut self.cart,
            ciram: &mut self.ciram,
        };
        self.ppu.clock(&mut memory);
    }

    /// Set the live state of a controller port (0 or 1).
    pub fn set_controller(&mut self, port: usize, state: u8) {
        self.controllers[port].state = state;
    }

    /// True while an OAM DMA transfer owns the CPU.
    #[must_use]
    pub fn dma_active(&self) -> bool {
        self.dma_transfer
    }

    /// One stolen CPU cycle of OAM DMA.
    ///
    /// The transfer idles until an even master alignment, then alternates
    /// read cycles (even) and OAM write cycles (odd) until the page wraps.
    pub fn dma_tick(&mut self, system_clock: u64) {
        if self.dma_dummy {
            if system_clock % 2 == 1 {
                self.dma_dummy = false;
            }
        } else if system_clock % 2 == 0 {
            let addr = (u16::from(self.dma_page) << 8) | u16::from(self.dma_addr);
            self.dma_data = self.dma_read(addr);
        } else {
            self.ppu.write_oam(self.dma_addr, self.dma_data);
            self.dma_addr = self.dma_addr.wrapping_add(1);
            if self.dma_addr == 0 {
                self.dma_transfer = false;
                self.dma_dummy = true;
            }
        }
    }

    /// DMA source read: RAM or cartridge, never I/O registers.
    fn dma_read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x4020..=0xFFFF => self.cart.cpu_read(addr).unwrap_or(0),
            _ => 0,
        }
    }

    fn read_controller(&mut self, port: usize) -> u8 {
        if self.strobe {
            self.controllers[port].latch();
        }
        self.controllers[port].shift_out()
    }

    fn write_strobe(&mut self, data: u8) {
        let strobe = data & 0x01 != 0;
        if strobe {
            self.controllers[0].latch();
            self.controllers[1].latch();
        }
        self.strobe = strobe;
    }
}

impl famicore_cpu::Bus for Bus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => {
                let mut memory = PpuMemory {
                    cart: &mut self.cart,
                    ciram: &mut self.ciram,
                };
                self.ppu.cpu_read(addr, &mut memory)
            }
            0x4016 => self.read_controller(0),
            0x4017 => self.read_controller(1),
            // APU and remaining I/O: register-level stub
            0x4000..=0x401F => 0,
            0x4020..=0xFFFF => self.cart.cpu_read(addr).unwrap_or(0),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)] = data,
            0x2000..=0x3FFF => {
                let Self {
                    ppu, cart, ciram, ..
                } = self;
                let mut memory = PpuMemory { cart, ciram };
                ppu.cpu_write(addr, data, &mut memory);
            }
            0x4014 => {
                self.dma_page = data;
                self.dma_addr = 0;
                self.dma_transfer = true;
                self.dma_dummy = true;
            }
            0x4016 => self.write_strobe(data),
            // APU and remaining I/O: writes discarded
            0x4000..=0x401F => {}
            0x4020..=0xFFFF => {
                self.cart.cpu_write(addr, data);
            }
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x4020..=0xFFFF => self.cart.cpu_read(addr).unwrap_or(0),
            // PPU and I/O registers have read side effects; report quiet zero
            _ => 0,
        }
    }
}
