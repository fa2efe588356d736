//! Monotonic tick counters.

use std::time::Instant;

/// A free-running 32-bit counter that wraps on overflow
pub trait TickCounter {
    fn now(&mut self) -> u32;
}

/// Host counter derived from [`Instant`], ticking at `hz`
#[derive(Debug, Clone)]
pub struct InstantCounter {
    origin: Instant,
    hz: u32,
}

impl InstantCounter {
    pub fn new(hz: u32) -> Self {
        Self {
            origin: Instant::now(),
            hz,
        }
    }
}

impl TickCounter for InstantCounter {
    fn now(&mut self) -> u32 {
        let nanos = self.origin.elapsed().as_nanos();
        // Truncation to 32 bits is the hardware counter's wraparound.
        (nanos * u128::from(self.hz) / 1_000_000_000) as u32
    }
}

/// Deterministic counter that advances by a fixed step on every read
#[derive(Debug, Clone, Copy)]
pub struct SteppedCounter {
    next: u32,
    step: u32,
}

impl SteppedCounter {
    pub fn new(start: u32, step: u32) -> Self {
        Self { next: start, step }
    }
}

impl TickCounter for SteppedCounter {
    fn now(&mut self) -> u32 {
        let now = self.next;
        self.next = self.next.wrapping_add(self.step);
        now
    }
}
