//! Whole-frame emulation throughput.

use criterion::{criterion_group, criterion_main, Criterion};
use famicore_core::Console;

const PRG_BANK: usize = 16 * 1024;
const CHR_BANK: usize = 8 * 1024;

/// NROM image spinning in a tight loop with rendering enabled.
fn build_console() -> Console {
    let mut image = vec![
        0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];
    image.resize(16 + 2 * PRG_BANK + CHR_BANK, 0);
    let program = [
        0xA9, 0x1E, // LDA #$1E: both layers on
        0x8D, 0x01, 0x20, // STA $2001
        0x4C, 0x05, 0x80, // JMP self
    ];
    image[16..16 + program.len()].copy_from_slice(&program);
    image[16 + 0x7FFC] = 0x00;
    image[16 + 0x7FFD] = 0x80;
    Console::from_bytes(&image).expect("benchmark image parses")
}

fn frame_throughput(c: &mut Criterion) {
    c.bench_function("frame", |b| {
        let mut console = build_console();
        console.reset();
        b.iter(|| console.frame());
    });
}

criterion_group!(benches, frame_throughput);
criterion_main!(benches);
