//! PPU control, mask, and status registers.

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL ($2000).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuCtrl: u8 {
        /// Base nametable address, X bit.
        const NAMETABLE_X = 1 << 0;
        /// Base nametable address, Y bit.
        const NAMETABLE_Y = 1 << 1;
        /// VRAM address increment: 0 adds 1, 1 adds 32.
        const INCREMENT_MODE = 1 << 2;
        /// Sprite pattern table for 8x8 sprites.
        const PATTERN_SPRITE = 1 << 3;
        /// Background pattern table.
        const PATTERN_BACKGROUND = 1 << 4;
        /// Sprite size: 0 is 8x8, 1 is 8x16.
        const SPRITE_SIZE = 1 << 5;
        /// PPU master/slave select (unused on the NES).
        const SLAVE_MODE = 1 << 6;
        /// Generate NMI at the start of vertical blank.
        const ENABLE_NMI = 1 << 7;
    }
}

impl PpuCtrl {
    /// VRAM address step after a PPUDATA access.
    #[inline]
    #[must_use]
    pub fn vram_increment(self) -> u16 {
        if self.contains(Self::INCREMENT_MODE) {
            32
        } else {
            1
        }
    }

    /// Sprite height in scanlines (8 or 16).
    #[inline]
    #[must_use]
    pub fn sprite_height(self) -> i16 {
        if self.contains(Self::SPRITE_SIZE) {
            16
        } else {
            8
        }
    }

    /// Background pattern table base address ($0000 or $1000).
    #[inline]
    #[must_use]
    pub fn background_table(self) -> u16 {
        if self.contains(Self::PATTERN_BACKGROUND) {
            0x1000
        } else {
            0x0000
        }
    }

    /// Sprite pattern table base address for 8x8 sprites.
    #[inline]
    #[must_use]
    pub fn sprite_table(self) -> u16 {
        if self.contains(Self::PATTERN_SPRITE) {
            0x1000
        } else {
            0x0000
        }
    }
}

bitflags! {
    /// PPUMASK ($2001).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuMask: u8 {
        /// Grayscale output.
        const GRAYSCALE = 1 << 0;
        /// Show background in the leftmost 8 pixels.
        const RENDER_BACKGROUND_LEFT = 1 << 1;
        /// Show sprites in the leftmost 8 pixels.
        const RENDER_SPRITES_LEFT = 1 << 2;
        /// Enable background rendering.
        const RENDER_BACKGROUND = 1 << 3;
        /// Enable sprite rendering.
        const RENDER_SPRITES = 1 << 4;
        /// Emphasize red.
        const EMPHASIZE_RED = 1 << 5;
        /// Emphasize green.
        const EMPHASIZE_GREEN = 1 << 6;
        /// Emphasize blue.
        const EMPHASIZE_BLUE = 1 << 7;
    }
}

impl PpuMask {
    /// True when either layer is being rendered. Gates scroll updates.
    #[inline]
    #[must_use]
    pub fn rendering_enabled(self) -> bool {
        self.intersects(Self::RENDER_BACKGROUND | Self::RENDER_SPRITES)
    }
}

bitflags! {
    /// PPUSTATUS ($2002). The low five bits are stale bus bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuStatus: u8 {
        /// More than eight sprites matched on a scanline.
        const SPRITE_OVERFLOW = 1 << 5;
        /// An opaque sprite-0 pixel overlapped an opaque background pixel.
        const SPRITE_ZERO_HIT = 1 << 6;
        /// Vertical blank has started. Cleared by reading PPUSTATUS.
        const VERTICAL_BLANK = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_helpers() {
        let ctrl = PpuCtrl::from_bits_truncate(0x00);
        assert_eq!(ctrl.vram_increment(), 1);
        assert_eq!(ctrl.sprite_height(), 8);
        assert_eq!(ctrl.background_table(), 0x0000);

        let ctrl = PpuCtrl::INCREMENT_MODE | PpuCtrl::SPRITE_SIZE | PpuCtrl::PATTERN_BACKGROUND;
        assert_eq!(ctrl.vram_increment(), 32);
        assert_eq!(ctrl.sprite_height(), 16);
        assert_eq!(ctrl.background_table(), 0x1000);
    }

    #[test]
    fn mask_rendering_enabled() {
        assert!(!PpuMask::empty().rendering_enabled());
        assert!(PpuMask::RENDER_BACKGROUND.rendering_enabled());
        assert!(PpuMask::RENDER_SPRITES.rendering_enabled());
        assert!(!PpuMask::GRAYSCALE.rendering_enabled());
    }
}
