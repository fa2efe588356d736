//! Display surfaces - where packed framebuffer words end up
//!
//! The encoder writes through [`DisplaySurface`]; firmware builds point it at
//! memory-mapped registers, host builds and tests at an in-memory
//! [`PackedFrame`].

use crate::types::{
    Cell, PlayerId, BOARD_WIDTH, CELLS_PER_WORD, HOLD_NEXT_WORDS, WORDS_PER_BOARD,
};

/// Sink for packed display words
pub trait DisplaySurface {
    /// Write word `index` (0..25) of `player`'s board region
    fn write_board_word(&mut self, player: PlayerId, index: usize, word: u32);

    /// Write word `index` (0..2) of the shared hold/lookahead region
    fn write_hold_next_word(&mut self, index: usize, word: u32);
}

/// Nibble `slot` (0 = most significant) of a packed word
#[inline]
pub fn nibble(word: u32, slot: usize) -> u8 {
    ((word >> (4 * (CELLS_PER_WORD - 1 - slot))) & 0xF) as u8
}

/// In-memory copy of all three display regions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedFrame {
    boards: [[u32; WORDS_PER_BOARD]; 2],
    hold_next: [u32; HOLD_NEXT_WORDS],
}

impl PackedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board_words(&self, player: PlayerId) -> &[u32; WORDS_PER_BOARD] {
        &self.boards[player.index()]
    }

    pub fn hold_next_words(&self) -> &[u32; HOLD_NEXT_WORDS] {
        &self.hold_next
    }

    /// Decoded cell value at (x, y) of `player`'s board
    pub fn cell(&self, player: PlayerId, x: usize, y: usize) -> Cell {
        let idx = y * BOARD_WIDTH as usize + x;
        nibble(
            self.boards[player.index()][idx / CELLS_PER_WORD],
            idx % CELLS_PER_WORD,
        )
    }

    /// Decoded hold/lookahead nibble `slot` (0..16)
    pub fn hold_next_slot(&self, slot: usize) -> u8 {
        nibble(self.hold_next[slot / CELLS_PER_WORD], slot % CELLS_PER_WORD)
    }
}

impl DisplaySurface for PackedFrame {
    fn write_board_word(&mut self, player: PlayerId, index: usize, word: u32) {
        if let Some(slot) = self.boards[player.index()].get_mut(index) {
            *slot = word;
        }
    }

    fn write_hold_next_word(&mut self, index: usize, word: u32) {
        if let Some(slot) = self.hold_next.get_mut(index) {
            *slot = word;
        }
    }
}

/// Memory-mapped display registers written with volatile stores
#[derive(Debug)]
pub struct MmioSurface {
    boards: [*mut u32; 2],
    hold_next: *mut u32,
}

impl MmioSurface {
    /// Firmware address of player 1's board region
    pub const P1_BOARD_BASE: usize = 0x44A1_0000;
    /// Firmware address of player 2's board region (directly after player 1's)
    pub const P2_BOARD_BASE: usize = 0x44A1_0064;
    /// Firmware address of the hold/lookahead region
    pub const HOLD_NEXT_BASE: usize = 0x44A0_0000;

    /// # Safety
    ///
    /// Each address must point to writable, suitably aligned memory of at least
    /// 25 words (boards) or 2 words (hold/lookahead) for the lifetime of the
    /// surface, with no other aliasing Rust references.
    pub unsafe fn new(p1_board: usize, p2_board: usize, hold_next: usize) -> Self {
        Self {
            boards: [p1_board as *mut u32, p2_board as *mut u32],
            hold_next: hold_next as *mut u32,
        }
    }

    /// Surface at the firmware register addresses
    ///
    /// # Safety
    ///
    /// Only valid on the target where those registers are mapped.
    pub unsafe fn firmware() -> Self {
        Self::new(Self::P1_BOARD_BASE, Self::P2_BOARD_BASE, Self::HOLD_NEXT_BASE)
    }
}

impl DisplaySurface for MmioSurface {
    fn write_board_word(&mut self, player: PlayerId, index: usize, word: u32) {
        if index >= WORDS_PER_BOARD {
            return;
        }
        // SAFETY: `new` guarantees 25 writable words at the region base.
        unsafe { self.boards[player.index()].add(index).write_volatile(word) }
    }

    fn write_hold_next_word(&mut self, index: usize, word: u32) {
        if index >= HOLD_NEXT_WORDS {
            return;
        }
        // SAFETY: `new` guarantees 2 writable words at the region base.
        unsafe { self.hold_next.add(index).write_volatile(word) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_order_is_msb_first() {
        let word = 0x1234_5678;
        assert_eq!(nibble(word, 0), 1);
        assert_eq!(nibble(word, 7), 8);
    }

    #[test]
    fn test_packed_frame_ignores_out_of_range_words() {
        let mut frame = PackedFrame::new();
        frame.write_board_word(PlayerId::One, 25, 0xFFFF_FFFF);
        frame.write_hold_next_word(2, 0xFFFF_FFFF);
        assert_eq!(frame, PackedFrame::new());
    }

    #[test]
    fn test_mmio_surface_writes_through_pointers() {
        let mut p1 = [0u32; WORDS_PER_BOARD];
        let mut p2 = [0u32; WORDS_PER_BOARD];
        let mut hn = [0u32; HOLD_NEXT_WORDS];
        let mut surface = unsafe {
            MmioSurface::new(
                p1.as_mut_ptr() as usize,
                p2.as_mut_ptr() as usize,
                hn.as_mut_ptr() as usize,
            )
        };

        surface.write_board_word(PlayerId::One, 24, 0xAB);
        surface.write_board_word(PlayerId::Two, 0, 0xCD);
        surface.write_hold_next_word(1, 0xEF);
        surface.write_board_word(PlayerId::Two, 25, 0x99);
        drop(surface);

        assert_eq!(p1[24], 0xAB);
        assert_eq!(p2[0], 0xCD);
        assert_eq!(hn[1], 0xEF);
    }

    #[test]
    fn test_firmware_regions_are_contiguous() {
        assert_eq!(
            MmioSurface::P2_BOARD_BASE - MmioSurface::P1_BOARD_BASE,
            WORDS_PER_BOARD * 4
        );
    }
}
