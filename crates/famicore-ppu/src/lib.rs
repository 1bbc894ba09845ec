//! Cycle-accurate Ricoh 2C02 PPU core for the famicore NES emulator.
//!
//! The PPU emits one pixel per [`Ppu::clock`] call and renders a 256x240
//! RGB frame every 341x262 dots. Pattern table and nametable accesses are
//! delegated to the [`PpuBus`] trait so the machine can route them through
//! the cartridge mapper and its mirrored CIRAM.

mod oam;
mod palette;
mod ppu;
mod registers;
mod scroll;

pub use oam::{Oam, SpriteEntry};
pub use palette::SYSTEM_PALETTE;
pub use ppu::{Ppu, PpuBus, FRAME_HEIGHT, FRAME_WIDTH};
pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use scroll::Scroll;
