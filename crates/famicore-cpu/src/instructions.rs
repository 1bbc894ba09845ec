//! Instruction semantics.
//!
//! Each operation returns its extra-cycle flag: 1 for loads and logical
//! operations whose indexed forms pay the page-cross penalty, 0 for
//! everything else (read-modify-write and store forms absorb the fix-up
//! cycle into their base counts). Branch penalties are charged directly
//! into the cycle budget here.

use log::warn;

use crate::cpu::{Bus, Cpu};
use crate::opcodes::Operation;
use crate::status::Status;
use crate::vectors;

impl Cpu {
    /// Execute the decoded operation. Returns the operation's extra-cycle
    /// flag, ANDed with the addressing mode's flag by the caller.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn execute(&mut self, op: Operation, bus: &mut impl Bus) -> u8 {
        match op {
            // ----- arithmetic -----
            Operation::Adc => {
                let m = self.fetch(bus);
                self.add_to_a(m);
                1
            }
            Operation::Sbc => {
                let m = self.fetch(bus);
                self.add_to_a(m ^ 0xFF);
                1
            }
            Operation::Cmp => {
                let m = self.fetch(bus);
                self.compare(self.a, m);
                1
            }
            Operation::Cpx => {
                let m = self.fetch(bus);
                self.compare(self.x, m);
                0
            }
            Operation::Cpy => {
                let m = self.fetch(bus);
                self.compare(self.y, m);
                0
            }

            // ----- loads and stores -----
            Operation::Lda => {
                self.a = self.fetch(bus);
                self.status.set_zn(self.a);
                1
            }
            Operation::Ldx => {
                self.x = self.fetch(bus);
                self.status.set_zn(self.x);
                1
            }
            Operation::Ldy => {
                self.y = self.fetch(bus);
                self.status.set_zn(self.y);
                1
            }
            Operation::Sta => {
                bus.write(self.addr_abs, self.a);
                0
            }
            Operation::Stx => {
                bus.write(self.addr_abs, self.x);
                0
            }
            Operation::Sty => {
                bus.write(self.addr_abs, self.y);
                0
            }

            // ----- logical -----
            Operation::And => {
                let m = self.fetch(bus);
                self.a &= m;
                self.status.set_zn(self.a);
                1
            }
            Operation::Ora => {
                let m = self.fetch(bus);
                self.a |= m;
                self.status.set_zn(self.a);
                1
            }
            Operation::Eor => {
                let m = self.fetch(bus);
                self.a ^= m;
                self.status.set_zn(self.a);
                1
            }
            Operation::Bit => {
                let m = self.fetch(bus);
                self.status.set(Status::Z, self.a & m == 0);
                self.status.set(Status::N, m & 0x80 != 0);
                self.status.set(Status::V, m & 0x40 != 0);
                0
            }

            // ----- shifts and rotates (accumulator or memory) -----
            Operation::Asl => {
                let m = self.fetch(bus);
                self.status.set(Status::C, m & 0x80 != 0);
                let result = m << 1;
                self.status.set_zn(result);
                self.write_back(bus, result);
                0
            }
            Operation::Lsr => {
                let m = self.fetch(bus);
                self.status.set(Status::C, m & 0x01 != 0);
                let result = m >> 1;
                self.status.set_zn(result);
                self.write_back(bus, result);
                0
            }
            Operation::Rol => {
                let m = self.fetch(bus);
                let result = (m << 1) | u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, m & 0x80 != 0);
                self.status.set_zn(result);
                self.write_back(bus, result);
                0
            }
            Operation::Ror => {
                let m = self.fetch(bus);
                let result = (u8::from(self.status.contains(Status::C)) << 7) | (m >> 1);
                self.status.set(Status::C, m & 0x01 != 0);
                self.status.set_zn(result);
                self.write_back(bus, result);
                0
            }

            // ----- increments and decrements -----
            Operation::Inc => {
                let result = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, result);
                self.status.set_zn(result);
                0
            }
            Operation::Dec => {
                let result = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, result);
                self.status.set_zn(result);
                0
            }
            Operation::Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
                0
            }
            Operation::Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
                0
            }
            Operation::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
                0
            }
            Operation::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
                0
            }

            // ----- branches -----
            Operation::Bcc => self.branch_if(!self.status.contains(Status::C)),
            Operation::Bcs => self.branch_if(self.status.contains(Status::C)),
            Operation::Bne => self.branch_if(!self.status.contains(Status::Z)),
            Operation::Beq => self.branch_if(self.status.contains(Status::Z)),
            Operation::Bpl => self.branch_if(!self.status.contains(Status::N)),
            Operation::Bmi => self.branch_if(self.status.contains(Status::N)),
            Operation::Bvc => self.branch_if(!self.status.contains(Status::V)),
            Operation::Bvs => self.branch_if(self.status.contains(Status::V)),

            // ----- jumps and subroutines -----
            Operation::Jmp => {
                self.pc = self.addr_abs;
                0
            }
            Operation::Jsr => {
                let return_addr = self.pc.wrapping_sub(1);
                self.push_word(bus, return_addr);
                self.pc = self.addr_abs;
                0
            }
            Operation::Rts => {
                self.pc = self.pop_word(bus).wrapping_add(1);
                0
            }

            // ----- interrupts -----
            Operation::Brk => {
                // The byte after BRK is padding: the pushed address skips it.
                self.pc = self.pc.wrapping_add(1);
                self.status.insert(Status::I);
                self.push_word(bus, self.pc);
                self.push(bus, self.status.to_stack_byte(true));
                self.pc = self.read_word(bus, vectors::IRQ);
                0
            }
            Operation::Rti => {
                let p = self.pop(bus);
                self.status = Status::from_stack_byte(p);
                self.pc = self.pop_word(bus);
                0
            }

            // ----- stack -----
            Operation::Pha => {
                self.push(bus, self.a);
                0
            }
            Operation::Php => {
                let p = self.status.to_stack_byte(true);
                self.push(bus, p);
                0
            }
            Operation::Pla => {
                self.a = self.pop(bus);
                self.status.set_zn(self.a);
                0
            }
            Operation::Plp => {
                let p = self.pop(bus);
                self.status = Status::from_stack_byte(p);
                0
            }

            // ----- transfers -----
            Operation::Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
                0
            }
            Operation::Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
                0
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
                0
            }
            Operation::Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
                0
            }
            Operation::Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
                0
            }
            Operation::Txs => {
                self.sp = self.x;
                0
            }

            // ----- flags -----
            Operation::Clc => {
                self.status.remove(Status::C);
                0
            }
            Operation::Sec => {
                self.status.insert(Status::C);
                0
            }
            Operation::Cli => {
                self.status.remove(Status::I);
                0
            }
            Operation::Sei => {
                self.status.insert(Status::I);
                0
            }
            Operation::Clv => {
                self.status.remove(Status::V);
                0
            }
            Operation::Cld => {
                self.status.remove(Status::D);
                0
            }
            Operation::Sed => {
                self.status.insert(Status::D);
                0
            }

            // ----- no-ops, official and otherwise -----
            Operation::Nop => 1,

            // ----- undocumented -----
            Operation::Slo => {
                // ASL memory, then ORA the result
                let m = self.fetch(bus);
                self.status.set(Status::C, m & 0x80 != 0);
                let result = m << 1;
                bus.write(self.addr_abs, result);
                self.a |= result;
                self.status.set_zn(self.a);
                0
            }
            Operation::Rla => {
                // ROL memory, then AND the result
                let m = self.fetch(bus);
                let result = (m << 1) | u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, m & 0x80 != 0);
                bus.write(self.addr_abs, result);
                self.a &= result;
                self.status.set_zn(self.a);
                0
            }
            Operation::Sre => {
                // LSR memory, then EOR the result
                let m = self.fetch(bus);
                self.status.set(Status::C, m & 0x01 != 0);
                let result = m >> 1;
                bus.write(self.addr_abs, result);
                self.a ^= result;
                self.status.set_zn(self.a);
                0
            }
            Operation::Rra => {
                // ROR memory, then ADC the result
                let m = self.fetch(bus);
                let result = (u8::from(self.status.contains(Status::C)) << 7) | (m >> 1);
                self.status.set(Status::C, m & 0x01 != 0);
                bus.write(self.addr_abs, result);
                self.add_to_a(result);
                0
            }
            Operation::Lax => {
                let m = self.fetch(bus);
                self.a = m;
                self.x = m;
                self.status.set_zn(m);
                1
            }
            Operation::Sax => {
                bus.write(self.addr_abs, self.a & self.x);
                0
            }
            Operation::Dcp => {
                // DEC memory, then CMP
                let result = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, result);
                self.compare(self.a, result);
                0
            }
            Operation::Isb => {
                // INC memory, then SBC
                let result = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, result);
                self.add_to_a(result ^ 0xFF);
                0
            }
            Operation::Anc => {
                let m = self.fetch(bus);
                self.a &= m;
                self.status.set_zn(self.a);
                self.status.set(Status::C, self.a & 0x80 != 0);
                0
            }

            Operation::Xxx => {
                warn!(
                    "illegal opcode {:#04X} at {:#06X}, executing as NOP",
                    self.opcode,
                    self.pc.wrapping_sub(1)
                );
                0
            }
        }
    }

    /// ADC core, shared with SBC (operand pre-inverted) and RRA/ISB.
    fn add_to_a(&mut self, value: u8) {
        let a = u16::from(self.a);
        let m = u16::from(value);
        let sum = a + m + u16::from(self.status.contains(Status::C));

        self.status.set(Status::C, sum > 0xFF);
        self.status.set(Status::V, (!(a ^ m) & (a ^ sum)) & 0x0080 != 0);
        self.a = (sum & 0x00FF) as u8;
        self.status.set_zn(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.status.set(Status::C, register >= value);
        self.status.set_zn(register.wrapping_sub(value));
    }

    /// Taken branches cost one extra cycle, two when crossing a page.
    fn branch_if(&mut self, condition: bool) -> u8 {
        if condition {
            self.add_cycles(1);
            self.addr_abs = self.pc.wrapping_add(self.addr_rel);
            if self.addr_abs & 0xFF00 != self.pc & 0xFF00 {
                self.add_cycles(1);
            }
            self.pc = self.addr_abs;
        }
        0
    }
}
