//! Per-player key latches and rising-edge detection.
//!
//! Events arrive between control ticks; the latch remembers which keys are
//! held and which went down since the last tick, so a tap that is released
//! before the tick still produces exactly one edge.

use crate::types::{Key, KeyState};

/// Set of keys, one bit per [`Key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySet(u16);

impl KeySet {
    pub const EMPTY: KeySet = KeySet(0);

    pub fn contains(self, key: Key) -> bool {
        self.0 & key.mask() != 0
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.mask();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Held state plus pending rising edges for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyLatch {
    held: KeySet,
    pending: KeySet,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. A press of a key that was not held queues an edge.
    pub fn apply(&mut self, key: Key, state: KeyState) {
        match state {
            KeyState::Pressed => {
                if !self.held.contains(key) {
                    self.pending.insert(key);
                }
                self.held.insert(key);
            }
            KeyState::Released => {
                self.held.0 &= !key.mask();
            }
        }
    }

    /// Edges queued since the previous call
    pub fn take_edges(&mut self) -> KeySet {
        std::mem::take(&mut self.pending)
    }

    pub fn held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    /// Forget everything (used when a match starts)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_yields_one_edge() {
        let mut latch = KeyLatch::new();
        latch.apply(Key::Left, KeyState::Pressed);
        latch.apply(Key::Left, KeyState::Pressed);

        let edges = latch.take_edges();
        assert!(edges.contains(Key::Left));
        assert!(!edges.contains(Key::Right));
        assert!(latch.take_edges().is_empty());
        assert!(latch.held(Key::Left));
    }

    #[test]
    fn test_tap_between_ticks_is_kept() {
        let mut latch = KeyLatch::new();
        latch.apply(Key::HardDrop, KeyState::Pressed);
        latch.apply(Key::HardDrop, KeyState::Released);

        assert!(!latch.held(Key::HardDrop));
        assert!(latch.take_edges().contains(Key::HardDrop));
    }

    #[test]
    fn test_repress_after_release_is_new_edge() {
        let mut latch = KeyLatch::new();
        latch.apply(Key::Hold, KeyState::Pressed);
        let _ = latch.take_edges();
        latch.apply(Key::Hold, KeyState::Released);
        latch.apply(Key::Hold, KeyState::Pressed);
        assert!(latch.take_edges().contains(Key::Hold));
    }
}
