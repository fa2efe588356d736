//! Shared data structures and constants for the duel engine.
//!
//! Everything here is plain data with no dependencies, usable from the core
//! simulation, the input decoder, and the host-side tooling alike.
//!
//! # Board Dimensions
//!
//! The playfield is fixed at 10 columns by 20 rows. Every algorithm in the
//! engine (collision, line clears, garbage, framebuffer packing) assumes it.
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, 0 is the top)
//! - **Spawn position**: (3, 0), top-left of the 4x4 bounding box
//!
//! # Timing
//!
//! Timings are expressed in milliseconds and converted into monotonic counter
//! ticks by the engine configuration:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CONTROL_PERIOD_MS` | 50 | Input handling tick |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `GRAVITY_TABLE_MS[0]` | 500 | Gravity at speed level 0 |
//! | `FAST_GRAVITY_BONUS_MS` | 150 | Subtracted when the fast-gravity mod is on |
//! | `GRAVITY_FLOOR_MS` | 50 | Fastest gravity ever used |
//!
//! # Examples
//!
//! ```
//! use duel_tetris_types::{Key, KeyState, PieceKind, PlayerId, Rotation};
//!
//! assert_eq!(PieceKind::from_index(2), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color(), 5);
//!
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//!
//! assert_eq!(PlayerId::from_wire(2), Some(PlayerId::Two));
//! assert_eq!(Key::from_code(0x20), Some(Key::HardDrop));
//! assert_eq!(KeyState::from_wire(1), Some(KeyState::Pressed));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on one board
pub const BOARD_CELLS: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Spawn column of the piece bounding box
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8 / 2) - 2;

/// Spawn row of the piece bounding box
pub const SPAWN_Y: i8 = 0;

/// Number of pre-generated entries in the shared piece sequence
pub const SEQUENCE_LEN: usize = 1000;

/// Number of upcoming pieces shown to each player
pub const LOOKAHEAD_LEN: usize = 5;

/// Cells packed into one 32-bit display word (one nibble each)
pub const CELLS_PER_WORD: usize = 8;

/// Display words per board region
pub const WORDS_PER_BOARD: usize = BOARD_CELLS / CELLS_PER_WORD;

/// Display words in the shared hold/lookahead region
pub const HOLD_NEXT_WORDS: usize = 2;

/// Color code of an empty cell
pub const EMPTY: Cell = 0;

/// Color code of an injected garbage cell
pub const GARBAGE_COLOR: Cell = 8;

/// Color code of the drop preview (render only, never stored in a grid)
pub const GHOST_COLOR: Cell = 9;

/// Nibble written for an empty hold slot
pub const HOLD_EMPTY_NIBBLE: u8 = 0xF;

/// Default monotonic counter frequency (100 MHz)
pub const DEFAULT_COUNTER_HZ: u32 = 100_000_000;

/// Control tick period in milliseconds
pub const CONTROL_PERIOD_MS: u32 = 50;

/// Lock delay in milliseconds
pub const LOCK_DELAY_MS: u32 = 500;

/// Gravity period by speed level (milliseconds per row).
///
/// Index is `min(total_lines_both_players / 10, 9)`; each level is 9/10 of the
/// previous one.
pub const GRAVITY_TABLE_MS: [u32; 10] = [500, 450, 405, 364, 327, 294, 264, 237, 213, 191];

/// Amount removed from the gravity period by the fast-gravity mod
pub const FAST_GRAVITY_BONUS_MS: u32 = 150;

/// Gravity period never drops below this
pub const GRAVITY_FLOOR_MS: u32 = 50;

/// Points for clearing 0..=4 lines in one clear
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Garbage rows sent for clearing 0..=4 lines in one clear
pub const GARBAGE_ROWS: [u8; 5] = [0, 0, 1, 2, 4];

/// A cell color code: 0 empty, 1-7 piece colors, 8 garbage, 9 ghost (render only).
pub type Cell = u8;

/// The seven piece kinds, in shared-sequence order.
///
/// The discriminant is the id carried by the sequence and written into the
/// hold/lookahead display words; [`PieceKind::color`] is the grid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Look up a kind by sequence id (0..=6)
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Sequence id of this kind
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Grid color code written when this piece locks
    pub fn color(self) -> Cell {
        match self {
            PieceKind::S => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::I => 4,
            PieceKind::T => 5,
            PieceKind::O => 6,
            PieceKind::Z => 7,
        }
    }

    /// Single-letter name, used by log lines and the terminal viewer
    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Rotation states, clockwise from spawn.
///
/// The cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Index into the shape table (0..=3)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// One of the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Parse the wire player byte (1 or 2)
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    /// Wire player byte
    pub fn wire(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Array slot (0 or 1)
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Wire key codes (host virtual-key codes).
pub mod keycode {
    pub const LEFT: u8 = 0x25;
    pub const RIGHT: u8 = 0x27;
    pub const ROTATE_CW: u8 = 0x26;
    pub const ROTATE_CCW: u8 = 0x5A;
    pub const SOFT_DROP: u8 = 0x28;
    pub const HARD_DROP: u8 = 0x20;
    pub const HOLD: u8 = 0x43;
    pub const READY: u8 = 0x0D;
    pub const MOD_DISABLE_HOLD: u8 = 0x31;
    pub const MOD_FAST_GRAVITY: u8 = 0x32;
    pub const MOD_MESSY_GARBAGE: u8 = 0x33;
    pub const MOD_DISABLE_GARBAGE: u8 = 0x34;
    pub const MOD_SINGLE_PLAYER: u8 = 0x35;
}

/// A recognized input key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
    Hold,
    Ready,
    ToggleDisableHold,
    ToggleFastGravity,
    ToggleMessyGarbage,
    ToggleDisableGarbage,
    ToggleSinglePlayer,
}

impl Key {
    /// Parse a wire key code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            keycode::LEFT => Some(Key::Left),
            keycode::RIGHT => Some(Key::Right),
            keycode::ROTATE_CW => Some(Key::RotateCw),
            keycode::ROTATE_CCW => Some(Key::RotateCcw),
            keycode::SOFT_DROP => Some(Key::SoftDrop),
            keycode::HARD_DROP => Some(Key::HardDrop),
            keycode::HOLD => Some(Key::Hold),
            keycode::READY => Some(Key::Ready),
            keycode::MOD_DISABLE_HOLD => Some(Key::ToggleDisableHold),
            keycode::MOD_FAST_GRAVITY => Some(Key::ToggleFastGravity),
            keycode::MOD_MESSY_GARBAGE => Some(Key::ToggleMessyGarbage),
            keycode::MOD_DISABLE_GARBAGE => Some(Key::ToggleDisableGarbage),
            keycode::MOD_SINGLE_PLAYER => Some(Key::ToggleSinglePlayer),
            _ => None,
        }
    }

    /// Wire key code
    pub fn code(self) -> u8 {
        match self {
            Key::Left => keycode::LEFT,
            Key::Right => keycode::RIGHT,
            Key::RotateCw => keycode::ROTATE_CW,
            Key::RotateCcw => keycode::ROTATE_CCW,
            Key::SoftDrop => keycode::SOFT_DROP,
            Key::HardDrop => keycode::HARD_DROP,
            Key::Hold => keycode::HOLD,
            Key::Ready => keycode::READY,
            Key::ToggleDisableHold => keycode::MOD_DISABLE_HOLD,
            Key::ToggleFastGravity => keycode::MOD_FAST_GRAVITY,
            Key::ToggleMessyGarbage => keycode::MOD_MESSY_GARBAGE,
            Key::ToggleDisableGarbage => keycode::MOD_DISABLE_GARBAGE,
            Key::ToggleSinglePlayer => keycode::MOD_SINGLE_PLAYER,
        }
    }

    /// Keys that drive a piece during the match
    pub fn is_gameplay(self) -> bool {
        matches!(
            self,
            Key::Left
                | Key::Right
                | Key::RotateCw
                | Key::RotateCcw
                | Key::SoftDrop
                | Key::HardDrop
                | Key::Hold
        )
    }

    /// Bit used by per-player key latches
    pub fn mask(self) -> u16 {
        1 << (self as u16)
    }
}

/// Wire key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Released,
    Pressed,
}

impl KeyState {
    /// Parse the wire state byte (0 released, 1 pressed)
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(KeyState::Released),
            1 => Some(KeyState::Pressed),
            _ => None,
        }
    }

    pub fn wire(self) -> u8 {
        match self {
            KeyState::Released => 0,
            KeyState::Pressed => 1,
        }
    }
}

/// Match-wide rule toggles, fixed once the pre-match handshake completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MatchMods {
    pub hold_disabled: bool,
    pub fast_gravity: bool,
    pub messy_garbage: bool,
    pub garbage_disabled: bool,
    pub single_player: bool,
}

impl MatchMods {
    /// Flip the toggle bound to `key`.
    ///
    /// Returns false if `key` is not a mod toggle.
    pub fn toggle(&mut self, key: Key) -> bool {
        let flag = match key {
            Key::ToggleDisableHold => &mut self.hold_disabled,
            Key::ToggleFastGravity => &mut self.fast_gravity,
            Key::ToggleMessyGarbage => &mut self.messy_garbage,
            Key::ToggleDisableGarbage => &mut self.garbage_disabled,
            Key::ToggleSinglePlayer => &mut self.single_player,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Whether attacks are exchanged between boards
    pub fn garbage_enabled(&self) -> bool {
        !self.garbage_disabled && !self.single_player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firmware_timing_defaults() {
        assert_eq!(CONTROL_PERIOD_MS, 50);
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(GRAVITY_TABLE_MS[0], 500);
        assert_eq!(DEFAULT_COUNTER_HZ, 100_000_000);
    }

    #[test]
    fn gravity_table_is_nine_tenths_per_level() {
        for pair in GRAVITY_TABLE_MS.windows(2) {
            assert_eq!(pair[1], pair[0] * 9 / 10);
        }
    }

    #[test]
    fn board_fits_word_grid() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(WORDS_PER_BOARD, 25);
        assert_eq!(BOARD_CELLS % CELLS_PER_WORD, 0);
    }
}
