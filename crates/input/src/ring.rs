//! Single-producer / single-consumer byte ring between the receive context
//! and the main loop.
//!
//! Overflow policy is drop-newest: when the ring is full the incoming byte is
//! discarded and counted. Nothing blocks and the producer gets no other
//! backpressure signal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Default ring capacity in bytes
pub const DEFAULT_RING_CAPACITY: usize = 256;

/// Anything the decoder can pull raw bytes from without blocking
pub trait ByteSource {
    /// Next available byte, or `None` if nothing is pending right now
    fn read_byte(&mut self) -> Option<u8>;

    /// Bytes lost before reaching this source, if it can tell
    fn dropped(&self) -> u64 {
        0
    }
}

impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

/// Create a ring of `capacity` bytes.
pub fn byte_ring(capacity: usize) -> (ByteProducer, ByteConsumer) {
    let (producer, consumer) = RingBuffer::<u8>::new(capacity);
    let dropped = Arc::new(AtomicU64::new(0));
    (
        ByteProducer {
            inner: producer,
            dropped: Arc::clone(&dropped),
        },
        ByteConsumer {
            inner: consumer,
            dropped,
        },
    )
}

/// Receive-side handle
pub struct ByteProducer {
    inner: Producer<u8>,
    dropped: Arc<AtomicU64>,
}

impl ByteProducer {
    /// Enqueue one byte. Returns false (and counts a drop) if the ring is full.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.inner.push(byte) {
            Ok(()) => true,
            Err(PushError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Enqueue every byte in order; returns how many were accepted.
    pub fn push_slice(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.push(b)).count()
    }

    /// Free slots right now
    pub fn free(&self) -> usize {
        self.inner.slots()
    }

    /// Total bytes dropped on overflow so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// The consumer side has gone away
    pub fn is_abandoned(&self) -> bool {
        self.inner.is_abandoned()
    }
}

/// Main-loop handle
pub struct ByteConsumer {
    inner: Consumer<u8>,
    dropped: Arc<AtomicU64>,
}

impl ByteConsumer {
    pub fn pop(&mut self) -> Option<u8> {
        self.inner.pop().ok()
    }

    /// Bytes waiting to be read
    pub fn len(&self) -> usize {
        self.inner.slots()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total bytes dropped on overflow so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl ByteSource for ByteConsumer {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop()
    }

    fn dropped(&self) -> u64 {
        ByteConsumer::dropped(self)
    }
}
