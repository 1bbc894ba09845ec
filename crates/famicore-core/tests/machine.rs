//! Whole-machine scenarios: cartridge geometry, controller protocol,
//! frame timing, and palette aliasing seen from the CPU side.

use famicore_core::{Buttons, Cartridge, Console, Mirroring, RomError};
use famicore_cpu::Bus as CpuBus;

const PRG_BANK: usize = 16 * 1024;
const CHR_BANK: usize = 8 * 1024;

/// Minimal iNES image: header plus zero-filled banks.
fn build_image(prg_banks: u8, chr_banks: u8, mapper_id: u8, flags6: u8) -> Vec<u8> {
    let mut image = vec![
        0x4E,
        0x45,
        0x53,
        0x1A,
        prg_banks,
        chr_banks,
        (mapper_id << 4) | flags6,
        mapper_id & 0xF0,
        0x00,
        0x00,
        0x00,
        0x00,
        0x00,
        0x00,
        0x00,
        0x00,
    ];
    image.resize(
        16 + usize::from(prg_banks) * PRG_BANK + usize::from(chr_banks) * CHR_BANK,
        0,
    );
    image
}

fn console_with_spin_loop() -> Console {
    let mut image = build_image(2, 1, 0, 0);
    // JMP $8000
    image[16..19].copy_from_slice(&[0x4C, 0x00, 0x80]);
    image[16 + 0x7FFC] = 0x00;
    image[16 + 0x7FFD] = 0x80;
    Console::from_bytes(&image).unwrap()
}

#[test]
fn ines_geometry_scenario() {
    // File beginning 4E 45 53 1A 01 01 00 00 ...
    let image = build_image(1, 1, 0, 0);
    let cart = Cartridge::from_bytes(&image).unwrap();

    assert_eq!(cart.mapper_id(), 0);
    assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    assert_eq!(cart.prg_len(), 16384);
    assert_eq!(cart.chr_len(), 8192);
}

#[test]
fn load_failures_are_fatal() {
    assert!(matches!(
        Console::from_bytes(&[0u8; 4]),
        Err(RomError::TooSmall(4))
    ));

    let image = build_image(1, 1, 3, 0); // CNROM: unsupported
    assert!(matches!(
        Console::from_bytes(&image),
        Err(RomError::UnsupportedMapper(3))
    ));
}

#[test]
fn controller_protocol_from_the_cpu_side() {
    let mut console = console_with_spin_loop();
    console.set_controller(0, Buttons::A | Buttons::SELECT | Buttons::DOWN);

    let bus = console.bus_mut();
    bus.write(0x4016, 0x01);
    bus.write(0x4016, 0x00);

    // {A, B, Select, Start, Up, Down, Left, Right}, MSB first
    let expected = [1, 0, 1, 0, 0, 1, 0, 0];
    for (i, &bit) in expected.iter().enumerate() {
        assert_eq!(bus.read(0x4016) & 1, bit, "read {i}");
    }
}

#[test]
fn relatch_replays_the_same_byte() {
    let mut console = console_with_spin_loop();
    console.set_controller(0, 0x5A);

    let bus = console.bus_mut();
    for _ in 0..2 {
        bus.write(0x4016, 0x01);
        bus.write(0x4016, 0x00);
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | (bus.read(0x4016) & 1);
        }
        assert_eq!(byte, 0x5A);
    }
}

#[test]
fn one_frame_completes_in_a_frame_of_ticks() {
    let mut console = console_with_spin_loop();

    let mut completions = 0;
    for _ in 0..341 * 262 {
        console.clock();
        if console.frame_complete() {
            completions += 1;
            console.clear_frame_complete();
        }
    }
    assert_eq!(completions, 1);
}

#[test]
fn palette_aliases_visible_through_the_bus() {
    let mut console = console_with_spin_loop();
    let bus = console.bus_mut();

    for (alias, target) in [
        (0x3F10u16, 0x3F00u16),
        (0x3F14, 0x3F04),
        (0x3F18, 0x3F08),
        (0x3F1C, 0x3F0C),
    ] {
        bus.write(0x2006, (alias >> 8) as u8);
        bus.write(0x2006, (alias & 0xFF) as u8);
        bus.write(0x2007, 0x2C);

        bus.write(0x2006, (target >> 8) as u8);
        bus.write(0x2006, (target & 0xFF) as u8);
        // Palette reads respond immediately, no buffer priming needed.
        assert_eq!(bus.read(0x2007), 0x2C, "alias {alias:04X}");
    }
}

#[test]
fn vblank_flag_visible_and_cleared_through_the_bus() {
    let mut console = console_with_spin_loop();

    // Run past scanline 241 dot 1.
    while console.bus().ppu.scanline() < 242 {
        console.clock();
    }
    let bus = console.bus_mut();
    let status = bus.read(0x2002);
    assert_eq!(status & 0x80, 0x80);
    assert_eq!(bus.read(0x2002) & 0x80, 0);
}

#[test]
fn reset_preserves_ram() {
    let mut console = console_with_spin_loop();
    console.bus_mut().write(0x0123, 0x77);
    console.reset();
    assert_eq!(console.bus_mut().read(0x0123), 0x77);
    assert_eq!(console.cpu().pc, 0x8000);
}
