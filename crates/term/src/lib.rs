//! Terminal viewer for the duel.
//!
//! The viewer never looks at engine state directly. It decodes the same packed
//! display words the firmware writes to the display controller (see
//! [`core::PackedFrame`]) and draws them, two characters per cell, into a
//! [`Canvas`] that [`Screen`] flushes to the terminal.

pub mod canvas;
pub mod duel_view;
pub mod renderer;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use canvas::{Canvas, Glyph, Ink, Rgb};
pub use duel_view::{nibble_rgb, DuelView, Hud, HudPhase, VIEW_HEIGHT, VIEW_WIDTH};
pub use renderer::{encode_all, encode_changes, Screen};
