//! NES machine core: bus, master clock, OAM DMA, and controllers.
//!
//! This crate wires the famicore CPU, PPU, and cartridge fabric into a
//! complete machine. The host drives [`Console::clock`] (one master tick),
//! [`Console::step`] (one CPU instruction), or [`Console::frame`] (one video
//! frame), feeds controller bytes in, and reads the RGB framebuffer out.
//!
//! # Example
//!
//! ```no_run
//! use famicore_core::{Buttons, Console};
//!
//! let image = std::fs::read("game.nes").expect("read image");
//! let mut console = Console::from_bytes(&image).expect("load cartridge");
//! console.reset();
//!
//! loop {
//!     console.set_controller(0, Buttons::A | Buttons::RIGHT);
//!     console.frame();
//!     let _pixels = console.framebuffer(); // 256 x 240 x 3 bytes
//! }
//! ```

mod bus;
mod console;
mod controller;

pub use bus::Bus;
pub use console::Console;
pub use controller::{Buttons, Controller};

pub use famicore_cpu::{Cpu, Status};
pub use famicore_mappers::{Cartridge, Mirroring, Rom, RomError};
pub use famicore_ppu::{Ppu, FRAME_HEIGHT, FRAME_WIDTH};
