//! Core simulation - pure, deterministic, and testable
//!
//! Board grid, piece catalog, sequencer, lock/line-clear state machine,
//! garbage exchange and framebuffer encoding. No I/O, no clocks, no globals:
//! every random draw comes from a match-owned [`Lcg`] and every timestamp is
//! passed in by the caller.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, compaction and garbage rows
//! - [`pieces`]: fixed 7 x 4 shape table, no wall kicks
//! - [`rng`]: match LCG and the shared 1000-entry piece sequence
//! - [`player`]: per-player board engine, hold and lookahead
//! - [`scoring`]: line points, attack rows, gravity speed table
//! - [`garbage`]: per-tick attack exchange between the two players
//! - [`framebuffer`]: nibble packing of boards and previews
//! - [`surface`]: where packed words are written (MMIO or memory)
//!
//! # Example
//!
//! ```
//! use duel_tetris_core::{Lcg, PieceSequence, PlayerState};
//!
//! let mut rng = Lcg::new(12345);
//! let seq = PieceSequence::generate(&mut rng);
//! let mut player = PlayerState::new(&seq);
//!
//! player.move_horizontal(1);
//! player.rotate(true);
//! let _ = player.hard_drop(&seq);
//!
//! assert_eq!(player.board().filled_count(), 4);
//! ```

pub mod board;
pub mod framebuffer;
pub mod garbage;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod surface;

pub use duel_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use framebuffer::{encode_board, encode_hold_next, pack_nibbles, render_frame};
pub use garbage::{exchange, inject_garbage};
pub use pieces::{get_minos, get_shape, shape_cell};
pub use player::{ActivePiece, GravityStep, HoldOutcome, PlayerState, SpawnStatus};
pub use rng::{Lcg, PieceSequence};
pub use scoring::{garbage_from_lines, gravity_period_ms, line_score};
pub use surface::{DisplaySurface, MmioSurface, PackedFrame};
