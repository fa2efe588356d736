//! Keyboard bridge: terminal key events in, wire events out.
//!
//! Supports terminals that do not emit key release events by releasing a
//! key once no press (or auto-repeat) for it has been seen for a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::decoder::InputEvent;
use crate::map::key_binding;
use crate::types::{Key, KeyState, PlayerId};

// A tap must outlive one control tick (50 ms) to be seen as held; terminal
// auto-repeat keeps a held key refreshed well inside this window.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Most keys tracked as held at once
pub const MAX_HELD_KEYS: usize = 16;

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    player: PlayerId,
    key: Key,
    last_seen: Instant,
}

/// Tracks held keys for both players and produces press/release events.
#[derive(Debug, Clone)]
pub struct KeyBridge {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    release_timeout: Duration,
}

impl KeyBridge {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.release_timeout
    }

    fn position(&self, player: PlayerId, key: Key) -> Option<usize> {
        self.held
            .iter()
            .position(|h| h.player == player && h.key == key)
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<InputEvent> {
        self.press_at(code, Instant::now())
    }

    /// A press (or terminal auto-repeat). Only the first press of a held key emits.
    pub fn press_at(&mut self, code: KeyCode, now: Instant) -> Option<InputEvent> {
        let (player, key) = key_binding(code)?;
        if let Some(i) = self.position(player, key) {
            self.held[i].last_seen = now;
            return None;
        }
        // Full table: emit the press but leave it untracked; it will never
        // get a synthesized release, which only costs a missed edge later.
        let _ = self.held.try_push(HeldKey {
            player,
            key,
            last_seen: now,
        });
        Some(InputEvent {
            player,
            key,
            state: KeyState::Pressed,
        })
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<InputEvent> {
        let (player, key) = key_binding(code)?;
        let i = self.position(player, key)?;
        self.held.swap_remove(i);
        Some(InputEvent {
            player,
            key,
            state: KeyState::Released,
        })
    }

    pub fn update(&mut self) -> ArrayVec<InputEvent, MAX_HELD_KEYS> {
        self.expire_at(Instant::now())
    }

    /// Release every key not refreshed within the timeout.
    pub fn expire_at(&mut self, now: Instant) -> ArrayVec<InputEvent, MAX_HELD_KEYS> {
        let mut released = ArrayVec::new();
        let timeout = self.release_timeout;
        self.held.retain(|h| {
            let alive = now.saturating_duration_since(h.last_seen) <= timeout;
            if !alive {
                released.push(InputEvent {
                    player: h.player,
                    key: h.key,
                    state: KeyState::Released,
                });
            }
            alive
        });
        released
    }

    /// Release everything at once (quit, focus loss)
    pub fn release_all(&mut self) -> ArrayVec<InputEvent, MAX_HELD_KEYS> {
        self.held
            .drain(..)
            .map(|h| InputEvent {
                player: h.player,
                key: h.key,
                state: KeyState::Released,
            })
            .collect()
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

impl Default for KeyBridge {
    fn default() -> Self {
        Self::new()
    }
}
