//! Engine configuration.
//!
//! Values come from `DUEL_TETRIS_*` environment variables; anything missing or
//! unparsable falls back to the firmware default.

use std::env;
use std::str::FromStr;

use crate::input::{DedupScope, DEFAULT_RING_CAPACITY, FRAME_LEN, MAX_DRAIN_BYTES};
use crate::types::{CONTROL_PERIOD_MS, DEFAULT_COUNTER_HZ, LOCK_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Monotonic counter frequency in Hz
    pub counter_hz: u32,
    pub control_ms: u32,
    pub lock_delay_ms: u32,
    /// Repeat left/right every control tick while held, instead of once per press
    pub auto_shift: bool,
    pub dedup: DedupScope,
    pub ring_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            counter_hz: DEFAULT_COUNTER_HZ,
            control_ms: CONTROL_PERIOD_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            auto_shift: false,
            dedup: DedupScope::PerPlayer,
            ring_capacity: DEFAULT_RING_CAPACITY,
        }
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// `1`, `true`, `yes` or `on` (any case) is set; anything else is unset.
pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// Keep the ring small enough that one decoder drain always empties it.
pub fn ring_capacity(requested: usize) -> usize {
    requested.clamp(FRAME_LEN, MAX_DRAIN_BYTES)
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let dedup = if env_flag("DUEL_TETRIS_SHARED_DEDUP") {
            DedupScope::Shared
        } else {
            DedupScope::PerPlayer
        };

        Self {
            counter_hz: env_parse("DUEL_TETRIS_COUNTER_HZ", defaults.counter_hz).max(1000),
            control_ms: env_parse("DUEL_TETRIS_CONTROL_MS", defaults.control_ms).max(1),
            lock_delay_ms: env_parse("DUEL_TETRIS_LOCK_DELAY_MS", defaults.lock_delay_ms),
            auto_shift: env_flag("DUEL_TETRIS_AUTO_SHIFT"),
            dedup,
            ring_capacity: ring_capacity(env_parse(
                "DUEL_TETRIS_RING_CAPACITY",
                defaults.ring_capacity,
            )),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing::new(self.counter_hz, self.control_ms, self.lock_delay_ms)
    }
}

/// Millisecond settings converted to counter ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub counter_hz: u32,
    pub control_period: u32,
    pub lock_delay: u32,
}

impl Timing {
    pub fn new(counter_hz: u32, control_ms: u32, lock_delay_ms: u32) -> Self {
        let mut timing = Self {
            counter_hz,
            control_period: 0,
            lock_delay: 0,
        };
        timing.control_period = timing.ms_to_ticks(control_ms).max(1);
        timing.lock_delay = timing.ms_to_ticks(lock_delay_ms);
        timing
    }

    /// Convert milliseconds to counter ticks, saturating at `u32::MAX`
    pub fn ms_to_ticks(&self, ms: u32) -> u32 {
        let ticks = u64::from(ms) * u64::from(self.counter_hz) / 1000;
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}
