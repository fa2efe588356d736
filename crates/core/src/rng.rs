//! RNG module - match LCG and the shared piece sequence
//!
//! One linear congruential generator is seeded per match. It first fills the
//! shared sequence, then keeps supplying garbage hole columns for the rest of
//! the match, so a seed fully determines every random outcome.

use crate::types::{PieceKind, SEQUENCE_LEN};

/// Linear congruential generator (Numerical Recipes constants, mod 2^32)
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a seed. A zero seed is valid.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the raw state
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, bound)`, taken from the high half of the state.
    ///
    /// The low bits of a power-of-two LCG cycle with short periods, so they are
    /// discarded before the modulo. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        (self.next_u32() >> 16) % bound
    }

    /// Current state, for logging and replay
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Pre-generated piece order shared by both players.
///
/// Read-only after generation; each player walks it with its own cursor and
/// wraps at the end.
#[derive(Debug, Clone)]
pub struct PieceSequence {
    pieces: [PieceKind; SEQUENCE_LEN],
}

impl PieceSequence {
    /// Fill the sequence with `SEQUENCE_LEN` draws of `rng.next_below(7)`
    pub fn generate(rng: &mut Lcg) -> Self {
        let mut pieces = [PieceKind::I; SEQUENCE_LEN];
        for slot in pieces.iter_mut() {
            let id = rng.next_below(PieceKind::ALL.len() as u32) as usize;
            *slot = PieceKind::ALL[id];
        }
        Self { pieces }
    }

    /// Piece at `cursor`, wrapping modulo the sequence length
    #[inline]
    pub fn get(&self, cursor: usize) -> PieceKind {
        self.pieces[cursor % SEQUENCE_LEN]
    }

    pub fn len(&self) -> usize {
        SEQUENCE_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces
    }
}
