//! CPU status register (P register) flags.
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! ```
//!
//! Bit 5 (U) reads as 1. Bit 4 (B) only carries meaning in copies of P
//! pushed to the stack: 1 from PHP/BRK, 0 from IRQ/NMI.

use bitflags::bitflags;

bitflags! {
    /// CPU status register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable (IRQ only; NMI is unaffected).
        const I = 1 << 2;
        /// Decimal mode. Stored but never applied: the 2A03 has no BCD unit.
        const D = 1 << 3;
        /// Break. Meaningful only in pushed copies of P.
        const B = 1 << 4;
        /// Unused. Reads as 1.
        const U = 1 << 5;
        /// Overflow.
        const V = 1 << 6;
        /// Negative.
        const N = 1 << 7;
    }
}

impl Status {
    /// Status after reset: U and I set.
    pub const RESET: Self = Self::U.union(Self::I);

    /// Update Z and N from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Byte to push for PHP/BRK (B and U forced to 1) or IRQ/NMI (B = 0).
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, brk: bool) -> u8 {
        let bits = self.bits() | Self::U.bits();
        if brk {
            bits | Self::B.bits()
        } else {
            bits & !Self::B.bits()
        }
    }

    /// Status restored by PLP/RTI: U forced to 1, B forced to 0.
    #[inline]
    #[must_use]
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate((value | Self::U.bits()) & !Self::B.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_state() {
        let status = Status::RESET;
        assert!(status.contains(Status::U));
        assert!(status.contains(Status::I));
        assert!(!status.contains(Status::C));
        assert!(!status.contains(Status::N));
    }

    #[test]
    fn set_zn() {
        let mut status = Status::empty();
        status.set_zn(0);
        assert!(status.contains(Status::Z));
        assert!(!status.contains(Status::N));

        status.set_zn(0x80);
        assert!(!status.contains(Status::Z));
        assert!(status.contains(Status::N));

        status.set_zn(0x42);
        assert!(!status.contains(Status::Z));
        assert!(!status.contains(Status::N));
    }

    #[test]
    fn stack_byte_forces_b_and_u() {
        let status = Status::C | Status::Z;
        assert_eq!(status.to_stack_byte(true) & 0x30, 0x30);
        assert_eq!(status.to_stack_byte(false) & 0x30, 0x20);
    }

    #[test]
    fn from_stack_byte_forces_u_clears_b() {
        let restored = Status::from_stack_byte(0xFF);
        assert!(restored.contains(Status::U));
        assert!(!restored.contains(Status::B));
        assert!(restored.contains(Status::C));
        assert!(restored.contains(Status::N));
    }
}
