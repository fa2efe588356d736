//! Input path: raw link bytes to per-player key edges.
//!
//! - [`ring`]: SPSC byte ring between the receive context and the main loop
//! - [`decoder`]: 3-byte frame reassembly, key mirror with repeat suppression, validation
//! - [`latch`]: held keys and rising edges per player
//! - [`map`] / [`handler`]: host keyboard to wire events, for the simulator
//!
//! The engine-facing pieces (`ring`, `decoder`, `latch`) do not allocate after
//! construction.

pub mod decoder;
pub mod handler;
pub mod latch;
pub mod map;
pub mod ring;

pub use duel_tetris_types as types;

pub use decoder::{
    Dedup, DedupScope, EventDecoder, FrameDecoder, InputEvent, KeyMirror, RawFrame, FRAME_LEN,
    MAX_DRAIN_BYTES, MAX_EVENTS_PER_DRAIN,
};
pub use handler::KeyBridge;
pub use latch::{KeyLatch, KeySet};
pub use map::{key_binding, should_quit};
pub use ring::{byte_ring, ByteConsumer, ByteProducer, ByteSource, DEFAULT_RING_CAPACITY};
