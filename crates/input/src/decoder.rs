//! Wire frame decoder.
//!
//! The link carries repeating 3-byte groups `[player, key_code, key_state]`
//! with no delimiter. A lost or duplicated byte misaligns every later frame;
//! there is no resynchronization.

use arrayvec::ArrayVec;

use crate::ring::ByteSource;
use crate::types::{Key, KeyState, PlayerId};

/// Bytes per wire frame
pub const FRAME_LEN: usize = 3;

/// Most events produced by a single [`EventDecoder::drain`] call
pub const MAX_EVENTS_PER_DRAIN: usize = 128;

/// Largest byte ring one drain is guaranteed to empty
pub const MAX_DRAIN_BYTES: usize = MAX_EVENTS_PER_DRAIN * FRAME_LEN;

/// An assembled frame, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawFrame {
    pub player: u8,
    pub key: u8,
    pub state: u8,
}

/// A validated input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub player: PlayerId,
    pub key: Key,
    pub state: KeyState,
}

impl InputEvent {
    /// Validate a raw frame. Unknown players, keys or states yield `None`.
    pub fn from_frame(frame: RawFrame) -> Option<Self> {
        Some(Self {
            player: PlayerId::from_wire(frame.player)?,
            key: Key::from_code(frame.key)?,
            state: KeyState::from_wire(frame.state)?,
        })
    }

    /// Wire encoding of this event
    pub fn to_wire(self) -> [u8; FRAME_LEN] {
        [self.player.wire(), self.key.code(), self.state.wire()]
    }
}

/// Reassembles frames one byte at a time.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    buf: [u8; FRAME_LEN],
    needed: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buf: [0; FRAME_LEN],
            needed: FRAME_LEN,
        }
    }

    /// Shift `byte` into the assembly buffer; returns a frame every third byte.
    pub fn push(&mut self, byte: u8) -> Option<RawFrame> {
        self.buf.copy_within(1.., 0);
        self.buf[FRAME_LEN - 1] = byte;
        self.needed -= 1;
        if self.needed > 0 {
            return None;
        }
        self.needed = FRAME_LEN;
        Some(RawFrame {
            player: self.buf[0],
            key: self.buf[1],
            state: self.buf[2],
        })
    }

    /// Bytes still needed to complete the current frame
    pub fn needed(&self) -> usize {
        self.needed
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Which frames share a duplicate-suppression latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// One latch per player; the other player's identical event is still mirrored.
    #[default]
    PerPlayer,
    /// A single latch for both players, as on the board.
    Shared,
}

/// Suppresses the key mirror write for an immediate repeat of the same
/// `(key_code, key_state)` pair. Gameplay dispatch is never gated by it.
#[derive(Debug, Clone)]
pub struct Dedup {
    scope: DedupScope,
    last: [Option<(u8, u8)>; 2],
}

impl Dedup {
    pub fn new(scope: DedupScope) -> Self {
        Self {
            scope,
            last: [None; 2],
        }
    }

    pub fn scope(&self) -> DedupScope {
        self.scope
    }

    /// True if the frame is new and should be mirrored; records it either way.
    pub fn accept(&mut self, player: PlayerId, key: u8, state: u8) -> bool {
        let slot = match self.scope {
            DedupScope::PerPlayer => player.index(),
            DedupScope::Shared => 0,
        };
        let pair = Some((key, state));
        if self.last[slot] == pair {
            return false;
        }
        self.last[slot] = pair;
        true
    }
}

/// Receives the raw key code of every accepted frame (debug output mirror).
pub trait KeyMirror {
    fn mirror(&mut self, player: PlayerId, key_code: u8);
}

impl KeyMirror for () {
    fn mirror(&mut self, _player: PlayerId, _key_code: u8) {}
}

/// Frame decoder plus dedup: bytes in, validated events out.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    frames: FrameDecoder,
    dedup: Dedup,
}

impl EventDecoder {
    pub fn new(scope: DedupScope) -> Self {
        Self {
            frames: FrameDecoder::new(),
            dedup: Dedup::new(scope),
        }
    }

    /// Feed one byte.
    ///
    /// Frames with an unknown player byte are dropped before dedup. New frames
    /// are mirrored even if their key code is not recognized; repeats are not
    /// mirrored but still decode, and the key latch absorbs repeated presses.
    pub fn push<M: KeyMirror + ?Sized>(&mut self, byte: u8, mirror: &mut M) -> Option<InputEvent> {
        let frame = self.frames.push(byte)?;
        let player = PlayerId::from_wire(frame.player)?;
        if self.dedup.accept(player, frame.key, frame.state) {
            mirror.mirror(player, frame.key);
        }
        InputEvent::from_frame(frame)
    }

    /// Read every byte currently available.
    ///
    /// Stops early once [`MAX_EVENTS_PER_DRAIN`] events are batched; the rest
    /// stays in the source for the next call. A source holding at most
    /// [`MAX_DRAIN_BYTES`] is always emptied.
    pub fn drain<S, M>(&mut self, source: &mut S, mirror: &mut M) -> ArrayVec<InputEvent, MAX_EVENTS_PER_DRAIN>
    where
        S: ByteSource + ?Sized,
        M: KeyMirror + ?Sized,
    {
        let mut events = ArrayVec::new();
        while !events.is_full() {
            let Some(byte) = source.read_byte() else {
                break;
            };
            if let Some(event) = self.push(byte, mirror) {
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keycode;
    use std::collections::VecDeque;

    #[test]
    fn test_frame_every_third_byte() {
        let mut dec = FrameDecoder::new();
        assert_eq!(dec.push(1), None);
        assert_eq!(dec.push(keycode::LEFT), None);
        assert_eq!(dec.needed(), 1);
        assert_eq!(
            dec.push(1),
            Some(RawFrame {
                player: 1,
                key: keycode::LEFT,
                state: 1
            })
        );
        assert_eq!(dec.needed(), 3);
    }

    #[test]
    fn test_lost_byte_misaligns_permanently() {
        let mut dec = FrameDecoder::new();
        // First frame missing its player byte.
        let bytes = [keycode::LEFT, 1, 2, keycode::RIGHT, 1, 2, keycode::HOLD, 1];
        let frames: Vec<RawFrame> = bytes.iter().filter_map(|&b| dec.push(b)).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].player, keycode::LEFT);
        assert_eq!(frames[1].key, 1);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let frame = |player, key, state| RawFrame { player, key, state };
        assert!(InputEvent::from_frame(frame(3, keycode::LEFT, 1)).is_none());
        assert!(InputEvent::from_frame(frame(1, 0x99, 1)).is_none());
        assert!(InputEvent::from_frame(frame(1, keycode::LEFT, 2)).is_none());
        assert!(InputEvent::from_frame(frame(2, keycode::HOLD, 0)).is_some());
    }

    #[test]
    fn test_full_ring_drains_in_one_call() {
        let mut source: VecDeque<u8> = VecDeque::new();
        for i in 0..MAX_EVENTS_PER_DRAIN {
            let state = (i % 2) as u8;
            source.extend([1, keycode::LEFT, state]);
        }
        assert_eq!(source.len(), MAX_DRAIN_BYTES);

        let events = EventDecoder::new(DedupScope::PerPlayer).drain(&mut source, &mut ());
        assert_eq!(events.len(), MAX_EVENTS_PER_DRAIN);
        assert!(source.is_empty());
    }

    #[test]
    fn test_per_player_dedup_keeps_other_player() {
        let mut dedup = Dedup::new(DedupScope::PerPlayer);
        assert!(dedup.accept(PlayerId::One, keycode::LEFT, 1));
        assert!(!dedup.accept(PlayerId::One, keycode::LEFT, 1));
        assert!(dedup.accept(PlayerId::Two, keycode::LEFT, 1));
        assert!(dedup.accept(PlayerId::One, keycode::LEFT, 0));
    }

    #[test]
    fn test_shared_dedup_suppresses_across_players() {
        let mut dedup = Dedup::new(DedupScope::Shared);
        assert!(dedup.accept(PlayerId::One, keycode::LEFT, 1));
        assert!(!dedup.accept(PlayerId::Two, keycode::LEFT, 1));
    }

    struct Recorder(Vec<(PlayerId, u8)>);

    impl KeyMirror for Recorder {
        fn mirror(&mut self, player: PlayerId, key_code: u8) {
            self.0.push((player, key_code));
        }
    }

    #[test]
    fn test_drain_mirrors_and_decodes() {
        let mut source: VecDeque<u8> = VecDeque::new();
        source.extend([1, keycode::HARD_DROP, 1]);
        source.extend([1, keycode::HARD_DROP, 1]); // duplicate, not mirrored
        source.extend([2, 0x77, 1]); // unknown key, still mirrored
        source.extend([2, keycode::HOLD, 1]);
        source.extend([1, keycode::LEFT]); // incomplete

        let mut dec = EventDecoder::new(DedupScope::PerPlayer);
        let mut mirror = Recorder(Vec::new());
        let events = dec.drain(&mut source, &mut mirror);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].key, Key::HardDrop);
        assert_eq!(events[1].key, Key::HardDrop);
        assert_eq!(events[2].player, PlayerId::Two);
        assert_eq!(
            mirror.0,
            vec![
                (PlayerId::One, keycode::HARD_DROP),
                (PlayerId::Two, 0x77),
                (PlayerId::Two, keycode::HOLD)
            ]
        );
        assert!(source.is_empty());
    }

    #[test]
    fn test_event_wire_encoding() {
        let event = InputEvent {
            player: PlayerId::Two,
            key: Key::RotateCcw,
            state: KeyState::Pressed,
        };
        assert_eq!(event.to_wire(), [2, keycode::ROTATE_CCW, 1]);
    }
}
