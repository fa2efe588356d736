//! Duel Tetris (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `duel_tetris::{core, engine, input, term, adapter, types}`
//! and carries the host-side glue used by the `duel-tetris` simulator binary.

pub mod hud;
pub mod logging;
pub mod report;

pub use duel_tetris_adapter as adapter;
pub use duel_tetris_core as core;
pub use duel_tetris_engine as engine;
pub use duel_tetris_input as input;
pub use duel_tetris_term as term;
pub use duel_tetris_types as types;
