//! The machine: CPU plus bus, driven off one master clock.
//!
//! Each [`Console::clock`] call is one master tick: the PPU emits a dot,
//! the CPU (or an in-flight OAM DMA) takes every third tick, and interrupt
//! lines raised by the PPU and the cartridge are serviced at instruction
//! boundaries.

use famicore_cpu::{trace, Cpu};
use famicore_mappers::{Cartridge, RomError};
use log::debug;

use crate::bus::Bus;

/// A complete NES machine.
pub struct Console {
    cpu: Cpu,
    bus: Bus,
    system_clock: u64,
    nmi_pending: bool,
}

impl Console {
    /// Build a machine around a loaded cartridge.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        let mut console = Self {
            cpu: Cpu::new(),
            bus: Bus::new(cart),
            system_clock: 0,
            nmi_pending: false,
        };
        console.cpu.reset(&mut console.bus);
        console
    }

    /// Parse a cartridge image and build the machine.
    ///
    /// # Errors
    ///
    /// Any [`RomError`]: bad magic, truncated image, unsupported mapper.
    pub fn from_bytes(image: &[u8]) -> Result<Self, RomError> {
        let cart = Cartridge::from_bytes(image)?;
        debug!(
            "attached cartridge: mapper {:03} ({})",
            cart.mapper_id(),
            cart.mapper_name()
        );
        Ok(Self::new(cart))
    }

    /// Reset the machine. RAM contents survive, per hardware.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.system_clock = 0;
        self.nmi_pending = false;
    }

    /// One master tick.
    pub fn clock(&mut self) {
        self.bus.tick_ppu();
        if self.bus.ppu.take_nmi() {
            self.nmi_pending = true;
        }

        if self.system_clock % 3 == 0 {
            if self.bus.dma_active() {
                self.bus.dma_tick(self.system_clock);
            } else {
                // Interrupts are taken at instruction boundaries: the
                // current instruction always completes first.
                if self.cpu.complete() {
                    if self.nmi_pending {
                        self.nmi_pending = false;
                        self.cpu.nmi(&mut self.bus);
                    } else if self.bus.cart.irq_pending() {
                        self.bus.cart.irq_clear();
                        self.cpu.irq(&mut self.bus);
                    }
                }
                self.cpu.clock(&mut self.bus);
            }
        }

        self.system_clock += 1;
    }

    /// Run master ticks until the CPU reaches its next instruction boundary.
    pub fn step(&mut self) {
        loop {
            let cpu_tick = self.system_clock % 3 == 0 && !self.bus.dma_active();
            self.clock();
            if cpu_tick && self.cpu.complete() {
                break;
            }
        }
    }

    /// Run master ticks until the PPU finishes the current frame, then
    /// clear the frame flag.
    pub fn frame(&mut self) {
        while !self.bus.ppu.frame_complete() {
            self.clock();
        }
        self.bus.ppu.clear_frame_complete();
    }

    /// One-shot frame boundary flag, for hosts driving `clock()` manually.
    #[must_use]
    pub fn frame_complete(&self) -> bool {
        self.bus.ppu.frame_complete()
    }

    /// Clear the frame boundary flag.
    pub fn clear_frame_complete(&mut self) {
        self.bus.ppu.clear_frame_complete();
    }

    /// The 256x240 RGB framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        self.bus.ppu.frame()
    }

    /// Set the packed button byte for a controller port (0 or 1).
    pub fn set_controller(&mut self, port: usize, state: u8) {
        self.bus.set_controller(port, state);
    }

    /// Assert the maskable interrupt line (honors the I flag).
    pub fn irq(&mut self) {
        self.cpu.irq(&mut self.bus);
    }

    /// Assert the non-maskable interrupt line.
    pub fn nmi(&mut self) {
        self.cpu.nmi(&mut self.bus);
    }

    /// Capture a nestest-format trace line for the next instruction.
    #[must_use]
    pub fn trace_line(&self) -> trace::TraceLine {
        trace::capture(
            &self.cpu,
            &self.bus,
            self.bus.ppu.scanline(),
            self.bus.ppu.dot(),
        )
    }

    /// Master ticks elapsed since reset.
    #[must_use]
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// CPU access for tests and debuggers.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU access for tests and debuggers.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Bus access for tests and debuggers.
    #[must_use]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Mutable bus access for tests and debuggers.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}
