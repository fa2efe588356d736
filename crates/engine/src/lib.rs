//! Match orchestration: handshake, tick scheduling and the main loop.
//!
//! The engine glues the input path to the core simulation. It owns the only
//! notion of time, a free-running 32-bit counter read through [`TickCounter`].
//!
//! ```
//! use std::collections::VecDeque;
//!
//! use duel_tetris_engine::core::PackedFrame;
//! use duel_tetris_engine::{Console, EngineConfig, SteppedCounter, TickCounter};
//!
//! let mut bytes: VecDeque<u8> = VecDeque::new();
//! // Both players press ready: [player, key, state]
//! bytes.extend([1, 0x0D, 1, 2, 0x0D, 1]);
//!
//! let mut console = Console::new(bytes, PackedFrame::new(), (), EngineConfig::default());
//! let mut counter = SteppedCounter::new(0, 1_000_000);
//! assert!(console.run_iteration(counter.now()).is_none());
//! assert!(console.duel().is_some());
//! ```

pub mod clock;
pub mod config;
pub mod console;
pub mod duel;
pub mod lobby;
pub mod scheduler;

pub use duel_tetris_core as core;
pub use duel_tetris_input as input;
pub use duel_tetris_types as types;

pub use clock::{InstantCounter, SteppedCounter, TickCounter};
pub use config::{env_flag, EngineConfig, Timing};
pub use console::{Console, Phase, TraceMirror};
pub use duel::{Duel, MatchOutcome, MatchResult};
pub use lobby::{Lobby, LobbyEvent, MatchStart};
pub use scheduler::{Accumulator, TickScheduler, Ticks};
