//! Scoring module - line points, attack table and gravity speed
//!
//! All three are fixed tables; there is no level multiplier, combo or
//! back-to-back bonus.

use crate::types::{
    FAST_GRAVITY_BONUS_MS, GARBAGE_ROWS, GRAVITY_FLOOR_MS, GRAVITY_TABLE_MS, LINE_SCORES,
};

/// Points for a single clear of `lines` rows.
/// lines: 0-4, anything larger scores nothing
pub fn line_score(lines: u8) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Garbage rows sent to the opponent for a single clear of `lines` rows
pub fn garbage_from_lines(lines: u8) -> u8 {
    GARBAGE_ROWS.get(lines as usize).copied().unwrap_or(0)
}

/// Speed level for the combined line count of both players
pub fn gravity_level(total_lines: u32) -> usize {
    ((total_lines / 10) as usize).min(GRAVITY_TABLE_MS.len() - 1)
}

/// Gravity period in milliseconds.
///
/// `total_lines` is the sum over both players. The fast-gravity mod subtracts
/// a fixed amount, never going below the floor.
pub fn gravity_period_ms(total_lines: u32, fast: bool) -> u32 {
    let base = GRAVITY_TABLE_MS[gravity_level(total_lines)];
    if fast {
        base.saturating_sub(FAST_GRAVITY_BONUS_MS).max(GRAVITY_FLOOR_MS)
    } else {
        base
    }
}
