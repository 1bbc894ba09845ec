//! The 256-entry opcode dispatch table.
//!
//! Every opcode byte maps to a record carrying its mnemonic, operation,
//! addressing mode, and base cycle count. Dispatch is data, not dynamic: the
//! operation and mode are fieldless enum discriminants matched in
//! `instructions.rs` and `addressing.rs`.
//!
//! Undocumented opcodes in the supported set (SLO, RLA, SRE, RRA, LAX, SAX,
//! DCP, ISB, ANC, the NOP variants) carry their real-silicon cycle counts.
//! The remaining holes are tabled as `Xxx` with plausible modes and cycles so
//! that the program counter and cycle budget stay consistent when a game
//! strays into them.

use crate::addressing::AddrMode;

/// Operations, official and undocumented. `Xxx` marks unmapped opcodes that
/// execute as NOPs after logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Operation {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    // Undocumented
    Slo, Rla, Sre, Rra, Lax, Sax, Dcp, Isb, Anc,
    Xxx,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Three-letter mnemonic, `"???"` for unmapped opcodes.
    pub mnemonic: &'static str,
    /// Operation discriminant.
    pub op: Operation,
    /// Addressing mode discriminant.
    pub mode: AddrMode,
    /// Base cycle count; page-cross and branch penalties are added on top.
    pub cycles: u8,
    /// True for opcodes outside the official instruction set.
    pub unofficial: bool,
}

const fn op(mnemonic: &'static str, op: Operation, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        op,
        mode,
        cycles,
        unofficial: false,
    }
}

const fn undoc(mnemonic: &'static str, op: Operation, mode: AddrMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        op,
        mode,
        cycles,
        unofficial: true,
    }
}

use AddrMode::{Abs, Abx, Aby, Imm, Imp, Ind, Izx, Izy, Rel, Zp0, Zpx, Zpy};
use Operation as O;

/// The dispatch table, indexed by opcode byte.
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    op("BRK", O::Brk, Imp, 7),    op("ORA", O::Ora, Izx, 6),
    undoc("???", O::Xxx, Imp, 2), undoc("SLO", O::Slo, Izx, 8),
    undoc("NOP", O::Nop, Zp0, 3), op("ORA", O::Ora, Zp0, 3),
    op("ASL", O::Asl, Zp0, 5),    undoc("SLO", O::Slo, Zp0, 5),
    op("PHP", O::Php, Imp, 3),    op("ORA", O::Ora, Imm, 2),
    op("ASL", O::Asl, Imp, 2),    undoc("ANC", O::Anc, Imm, 2),
    undoc("NOP", O::Nop, Abs, 4), op("ORA", O::Ora, Abs, 4),
    op("ASL", O::Asl, Abs, 6),    undoc("SLO", O::Slo, Abs, 6),
    // 0x10
    op("BPL", O::Bpl, Rel, 2),    op("ORA", O::Ora, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("SLO", O::Slo, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("ORA", O::Ora, Zpx, 4),
    op("ASL", O::Asl, Zpx, 6),    undoc("SLO", O::Slo, Zpx, 6),
    op("CLC", O::Clc, Imp, 2),    op("ORA", O::Ora, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("SLO", O::Slo, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("ORA", O::Ora, Abx, 4),
    op("ASL", O::Asl, Abx, 7),    undoc("SLO", O::Slo, Abx, 7),
    // 0x20
    op("JSR", O::Jsr, Abs, 6),    op("AND", O::And, Izx, 6),
    undoc("???", O::Xxx, Imp, 2), undoc("RLA", O::Rla, Izx, 8),
    op("BIT", O::Bit, Zp0, 3),    op("AND", O::And, Zp0, 3),
    op("ROL", O::Rol, Zp0, 5),    undoc("RLA", O::Rla, Zp0, 5),
    op("PLP", O::Plp, Imp, 4),    op("AND", O::And, Imm, 2),
    op("ROL", O::Rol, Imp, 2),    undoc("ANC", O::Anc, Imm, 2),
    op("BIT", O::Bit, Abs, 4),    op("AND", O::And, Abs, 4),
    op("ROL", O::Rol, Abs, 6),    undoc("RLA", O::Rla, Abs, 6),
    // 0x30
    op("BMI", O::Bmi, Rel, 2),    op("AND", O::And, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("RLA", O::Rla, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("AND", O::And, Zpx, 4),
    op("ROL", O::Rol, Zpx, 6),    undoc("RLA", O::Rla, Zpx, 6),
    op("SEC", O::Sec, Imp, 2),    op("AND", O::And, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("RLA", O::Rla, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("AND", O::And, Abx, 4),
    op("ROL", O::Rol, Abx, 7),    undoc("RLA", O::Rla, Abx, 7),
    // 0x40
    op("RTI", O::Rti, Imp, 6),    op("EOR", O::Eor, Izx, 6),
    undoc("???", O::Xxx, Imp, 2), undoc("SRE", O::Sre, Izx, 8),
    undoc("NOP", O::Nop, Zp0, 3), op("EOR", O::Eor, Zp0, 3),
    op("LSR", O::Lsr, Zp0, 5),    undoc("SRE", O::Sre, Zp0, 5),
    op("PHA", O::Pha, Imp, 3),    op("EOR", O::Eor, Imm, 2),
    op("LSR", O::Lsr, Imp, 2),    undoc("???", O::Xxx, Imm, 2),
    op("JMP", O::Jmp, Abs, 3),    op("EOR", O::Eor, Abs, 4),
    op("LSR", O::Lsr, Abs, 6),    undoc("SRE", O::Sre, Abs, 6),
    // 0x50
    op("BVC", O::Bvc, Rel, 2),    op("EOR", O::Eor, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("SRE", O::Sre, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("EOR", O::Eor, Zpx, 4),
    op("LSR", O::Lsr, Zpx, 6),    undoc("SRE", O::Sre, Zpx, 6),
    op("CLI", O::Cli, Imp, 2),    op("EOR", O::Eor, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("SRE", O::Sre, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("EOR", O::Eor, Abx, 4),
    op("LSR", O::Lsr, Abx, 7),    undoc("SRE", O::Sre, Abx, 7),
    // 0x60
    op("RTS", O::Rts, Imp, 6),    op("ADC", O::Adc, Izx, 6),
    undoc("???", O::Xxx, Imp, 2), undoc("RRA", O::Rra, Izx, 8),
    undoc("NOP", O::Nop, Zp0, 3), op("ADC", O::Adc, Zp0, 3),
    op("ROR", O::Ror, Zp0, 5),    undoc("RRA", O::Rra, Zp0, 5),
    op("PLA", O::Pla, Imp, 4),    op("ADC", O::Adc, Imm, 2),
    op("ROR", O::Ror, Imp, 2),    undoc("???", O::Xxx, Imm, 2),
    op("JMP", O::Jmp, Ind, 5),    op("ADC", O::Adc, Abs, 4),
    op("ROR", O::Ror, Abs, 6),    undoc("RRA", O::Rra, Abs, 6),
    // 0x70
    op("BVS", O::Bvs, Rel, 2),    op("ADC", O::Adc, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("RRA", O::Rra, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("ADC", O::Adc, Zpx, 4),
    op("ROR", O::Ror, Zpx, 6),    undoc("RRA", O::Rra, Zpx, 6),
    op("SEI", O::Sei, Imp, 2),    op("ADC", O::Adc, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("RRA", O::Rra, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("ADC", O::Adc, Abx, 4),
    op("ROR", O::Ror, Abx, 7),    undoc("RRA", O::Rra, Abx, 7),
    // 0x80
    undoc("NOP", O::Nop, Imm, 2), op("STA", O::Sta, Izx, 6),
    undoc("NOP", O::Nop, Imm, 2), undoc("SAX", O::Sax, Izx, 6),
    op("STY", O::Sty, Zp0, 3),    op("STA", O::Sta, Zp0, 3),
    op("STX", O::Stx, Zp0, 3),    undoc("SAX", O::Sax, Zp0, 3),
    op("DEY", O::Dey, Imp, 2),    undoc("NOP", O::Nop, Imm, 2),
    op("TXA", O::Txa, Imp, 2),    undoc("???", O::Xxx, Imm, 2),
    op("STY", O::Sty, Abs, 4),    op("STA", O::Sta, Abs, 4),
    op("STX", O::Stx, Abs, 4),    undoc("SAX", O::Sax, Abs, 4),
    // 0x90
    op("BCC", O::Bcc, Rel, 2),    op("STA", O::Sta, Izy, 6),
    undoc("???", O::Xxx, Imp, 2), undoc("???", O::Xxx, Izy, 6),
    op("STY", O::Sty, Zpx, 4),    op("STA", O::Sta, Zpx, 4),
    op("STX", O::Stx, Zpy, 4),    undoc("SAX", O::Sax, Zpy, 4),
    op("TYA", O::Tya, Imp, 2),    op("STA", O::Sta, Aby, 5),
    op("TXS", O::Txs, Imp, 2),    undoc("???", O::Xxx, Aby, 5),
    undoc("???", O::Xxx, Abx, 5), op("STA", O::Sta, Abx, 5),
    undoc("???", O::Xxx, Aby, 5), undoc("???", O::Xxx, Aby, 5),
    // 0xA0
    op("LDY", O::Ldy, Imm, 2),    op("LDA", O::Lda, Izx, 6),
    op("LDX", O::Ldx, Imm, 2),    undoc("LAX", O::Lax, Izx, 6),
    op("LDY", O::Ldy, Zp0, 3),    op("LDA", O::Lda, Zp0, 3),
    op("LDX", O::Ldx, Zp0, 3),    undoc("LAX", O::Lax, Zp0, 3),
    op("TAY", O::Tay, Imp, 2),    op("LDA", O::Lda, Imm, 2),
    op("TAX", O::Tax, Imp, 2),    undoc("???", O::Xxx, Imm, 2),
    op("LDY", O::Ldy, Abs, 4),    op("LDA", O::Lda, Abs, 4),
    op("LDX", O::Ldx, Abs, 4),    undoc("LAX", O::Lax, Abs, 4),
    // 0xB0
    op("BCS", O::Bcs, Rel, 2),    op("LDA", O::Lda, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("LAX", O::Lax, Izy, 5),
    op("LDY", O::Ldy, Zpx, 4),    op("LDA", O::Lda, Zpx, 4),
    op("LDX", O::Ldx, Zpy, 4),    undoc("LAX", O::Lax, Zpy, 4),
    op("CLV", O::Clv, Imp, 2),    op("LDA", O::Lda, Aby, 4),
    op("TSX", O::Tsx, Imp, 2),    undoc("???", O::Xxx, Aby, 4),
    op("LDY", O::Ldy, Abx, 4),    op("LDA", O::Lda, Abx, 4),
    op("LDX", O::Ldx, Aby, 4),    undoc("LAX", O::Lax, Aby, 4),
    // 0xC0
    op("CPY", O::Cpy, Imm, 2),    op("CMP", O::Cmp, Izx, 6),
    undoc("NOP", O::Nop, Imm, 2), undoc("DCP", O::Dcp, Izx, 8),
    op("CPY", O::Cpy, Zp0, 3),    op("CMP", O::Cmp, Zp0, 3),
    op("DEC", O::Dec, Zp0, 5),    undoc("DCP", O::Dcp, Zp0, 5),
    op("INY", O::Iny, Imp, 2),    op("CMP", O::Cmp, Imm, 2),
    op("DEX", O::Dex, Imp, 2),    undoc("???", O::Xxx, Imm, 2),
    op("CPY", O::Cpy, Abs, 4),    op("CMP", O::Cmp, Abs, 4),
    op("DEC", O::Dec, Abs, 6),    undoc("DCP", O::Dcp, Abs, 6),
    // 0xD0
    op("BNE", O::Bne, Rel, 2),    op("CMP", O::Cmp, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("DCP", O::Dcp, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("CMP", O::Cmp, Zpx, 4),
    op("DEC", O::Dec, Zpx, 6),    undoc("DCP", O::Dcp, Zpx, 6),
    op("CLD", O::Cld, Imp, 2),    op("CMP", O::Cmp, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("DCP", O::Dcp, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("CMP", O::Cmp, Abx, 4),
    op("DEC", O::Dec, Abx, 7),    undoc("DCP", O::Dcp, Abx, 7),
    // 0xE0
    op("CPX", O::Cpx, Imm, 2),    op("SBC", O::Sbc, Izx, 6),
    undoc("NOP", O::Nop, Imm, 2), undoc("ISB", O::Isb, Izx, 8),
    op("CPX", O::Cpx, Zp0, 3),    op("SBC", O::Sbc, Zp0, 3),
    op("INC", O::Inc, Zp0, 5),    undoc("ISB", O::Isb, Zp0, 5),
    op("INX", O::Inx, Imp, 2),    op("SBC", O::Sbc, Imm, 2),
    op("NOP", O::Nop, Imp, 2),    undoc("SBC", O::Sbc, Imm, 2),
    op("CPX", O::Cpx, Abs, 4),    op("SBC", O::Sbc, Abs, 4),
    op("INC", O::Inc, Abs, 6),    undoc("ISB", O::Isb, Abs, 6),
    // 0xF0
    op("BEQ", O::Beq, Rel, 2),    op("SBC", O::Sbc, Izy, 5),
    undoc("???", O::Xxx, Imp, 2), undoc("ISB", O::Isb, Izy, 8),
    undoc("NOP", O::Nop, Zpx, 4), op("SBC", O::Sbc, Zpx, 4),
    op("INC", O::Inc, Zpx, 6),    undoc("ISB", O::Isb, Zpx, 6),
    op("SED", O::Sed, Imp, 2),    op("SBC", O::Sbc, Aby, 4),
    undoc("NOP", O::Nop, Imp, 2), undoc("ISB", O::Isb, Aby, 7),
    undoc("NOP", O::Nop, Abx, 4), op("SBC", O::Sbc, Abx, 4),
    op("INC", O::Inc, Abx, 7),    undoc("ISB", O::Isb, Abx, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total() {
        for (byte, info) in OPCODE_TABLE.iter().enumerate() {
            assert!(
                info.cycles >= 2 && info.cycles <= 8,
                "opcode {byte:#04X} has cycle count {}",
                info.cycles
            );
            assert_eq!(info.mnemonic.len(), 3, "opcode {byte:#04X}");
        }
    }

    #[test]
    fn official_spot_checks() {
        assert_eq!(OPCODE_TABLE[0xA9].mnemonic, "LDA");
        assert_eq!(OPCODE_TABLE[0xA9].mode, Imm);
        assert_eq!(OPCODE_TABLE[0xA9].cycles, 2);

        assert_eq!(OPCODE_TABLE[0x6C].mnemonic, "JMP");
        assert_eq!(OPCODE_TABLE[0x6C].mode, Ind);
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);

        // Stores never take the page-cross penalty: base counts carry it.
        assert_eq!(OPCODE_TABLE[0x9D].cycles, 5);
        assert_eq!(OPCODE_TABLE[0x99].cycles, 5);
        assert_eq!(OPCODE_TABLE[0x91].cycles, 6);
    }

    #[test]
    fn undocumented_spot_checks() {
        assert_eq!(OPCODE_TABLE[0xA7].mnemonic, "LAX");
        assert!(OPCODE_TABLE[0xA7].unofficial);
        assert_eq!(OPCODE_TABLE[0xEB].mnemonic, "SBC");
        assert!(OPCODE_TABLE[0xEB].unofficial);
        assert_eq!(OPCODE_TABLE[0x1C].mode, Abx);
        assert_eq!(OPCODE_TABLE[0x1C].cycles, 4);
        assert_eq!(OPCODE_TABLE[0x03].cycles, 8);
    }
}
