//! Player module - one player's board engine and sequencer state
//!
//! Owns the grid, the falling piece, hold slot, lookahead window, lock-delay
//! timer and counters. Input gating (rising edges) and tick timing live in the
//! engine; everything here is a plain state transition.
//!
//! Per-piece lifecycle:
//!
//! ```text
//! SPAWNING -> FALLING <-> LOCK_PENDING -> LOCKED -> SPAWNING
//!                                                \-> TOPPED_OUT (spawn collided)
//! ```

use crate::board::Board;
use crate::rng::PieceSequence;
use crate::scoring::{garbage_from_lines, line_score};
use crate::types::{PieceKind, Rotation, LOOKAHEAD_LEN, SPAWN_X, SPAWN_Y};

/// The falling piece: kind, rotation and top-left of its 4x4 box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece at the spawn position in rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }
}

/// Result of placing a new piece at the spawn position
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStatus {
    Spawned,
    /// The new piece overlapped the grid; the player is out.
    ToppedOut,
}

impl SpawnStatus {
    pub fn is_topped_out(self) -> bool {
        self == SpawnStatus::ToppedOut
    }
}

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold disabled, already used for this piece, or player out
    Rejected,
    /// Empty slot filled; the next lookahead piece was spawned
    Stored,
    /// Active piece exchanged with the held one; lookahead untouched
    Swapped,
    /// The piece brought in by the hold overlapped the grid
    ToppedOut,
}

/// Result of one gravity evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStep {
    Fell,
    /// Blocked below; lock delay started at this tick
    LockStarted,
    /// Blocked below; lock delay still running
    LockPending,
    /// Locked, lines cleared, next piece spawned
    Locked,
    ToppedOut,
}

/// One player's complete match state
#[derive(Debug, Clone)]
pub struct PlayerState {
    board: Board,
    active: ActivePiece,
    hold: Option<PieceKind>,
    can_hold: bool,
    lookahead: [PieceKind; LOOKAHEAD_LEN],
    cursor: usize,
    /// Counter reading when the piece was first found blocked
    lock_timer: Option<u32>,
    lines_this_tick: u32,
    pending_attack: u8,
    total_lines: u32,
    score: u32,
    topped_out: bool,
}

impl PlayerState {
    /// Fresh player: lookahead holds `seq[0..5]`, cursor at 5, first piece spawned.
    pub fn new(seq: &PieceSequence) -> Self {
        let mut lookahead = [PieceKind::I; LOOKAHEAD_LEN];
        for (i, slot) in lookahead.iter_mut().enumerate() {
            *slot = seq.get(i);
        }
        let mut state = Self {
            board: Board::new(),
            active: ActivePiece::spawn(lookahead[0]),
            hold: None,
            can_hold: true,
            lookahead,
            cursor: LOOKAHEAD_LEN,
            lock_timer: None,
            lines_this_tick: 0,
            pending_attack: 0,
            total_lines: 0,
            score: 0,
            topped_out: false,
        };
        // An empty grid always accepts the first piece.
        let _ = state.spawn(seq);
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable grid access, for garbage injection and scripted setups
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Replace the falling piece (scripted setups)
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn lookahead(&self) -> &[PieceKind; LOOKAHEAD_LEN] {
        &self.lookahead
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lock_timer(&self) -> Option<u32> {
        self.lock_timer
    }

    pub fn lines_this_tick(&self) -> u32 {
        self.lines_this_tick
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pending_attack(&self) -> u8 {
        self.pending_attack
    }

    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    /// Whether the active piece's shape would collide with its box at (x, y)
    pub fn collides(&self, x: i8, y: i8) -> bool {
        self.board
            .collides(self.active.kind, self.active.rotation, x, y)
    }

    fn blocked_below(&self) -> bool {
        self.collides(self.active.x, self.active.y + 1)
    }

    fn cancel_lock_if_free(&mut self) {
        if self.lock_timer.is_some() && !self.blocked_below() {
            self.lock_timer = None;
        }
    }

    /// Pop the next lookahead piece into play and refill the window from the sequence.
    pub fn spawn(&mut self, seq: &PieceSequence) -> SpawnStatus {
        let kind = self.lookahead[0];
        self.lookahead.copy_within(1.., 0);
        self.lookahead[LOOKAHEAD_LEN - 1] = seq.get(self.cursor);
        self.cursor = (self.cursor + 1) % seq.len();

        self.place_at_spawn(kind)
    }

    fn place_at_spawn(&mut self, kind: PieceKind) -> SpawnStatus {
        self.active = ActivePiece::spawn(kind);
        self.can_hold = true;
        self.lock_timer = None;
        if self.collides(self.active.x, self.active.y) {
            self.topped_out = true;
            SpawnStatus::ToppedOut
        } else {
            SpawnStatus::Spawned
        }
    }

    /// Bank the active piece. Usable once per piece; see [`HoldOutcome`].
    pub fn hold(&mut self, seq: &PieceSequence, hold_disabled: bool) -> HoldOutcome {
        if hold_disabled || !self.can_hold || self.topped_out {
            return HoldOutcome::Rejected;
        }

        let current = self.active.kind;
        let (status, outcome) = match self.hold.replace(current) {
            None => (self.spawn(seq), HoldOutcome::Stored),
            Some(held) => (self.place_at_spawn(held), HoldOutcome::Swapped),
        };
        self.can_hold = false;

        if status.is_topped_out() {
            HoldOutcome::ToppedOut
        } else {
            outcome
        }
    }

    /// Shift one column (`dx` = -1 or 1). Rejected on collision.
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if self.topped_out {
            return false;
        }
        let x = self.active.x + dx;
        if self.collides(x, self.active.y) {
            return false;
        }
        self.active.x = x;
        self.cancel_lock_if_free();
        true
    }

    /// Rotate in place, reverting if the new orientation collides (no kicks)
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.topped_out {
            return false;
        }
        let previous = self.active.rotation;
        self.active.rotation = if clockwise {
            previous.rotate_cw()
        } else {
            previous.rotate_ccw()
        };
        if self.collides(self.active.x, self.active.y) {
            self.active.rotation = previous;
            return false;
        }
        self.cancel_lock_if_free();
        true
    }

    /// One downward step, if free
    pub fn soft_drop(&mut self) -> bool {
        if self.topped_out || self.blocked_below() {
            return false;
        }
        self.active.y += 1;
        self.cancel_lock_if_free();
        true
    }

    /// Drop to the floor, lock, clear and spawn, bypassing lock delay
    pub fn hard_drop(&mut self, seq: &PieceSequence) -> SpawnStatus {
        if self.topped_out {
            return SpawnStatus::ToppedOut;
        }
        self.active.y = self.ghost_y();
        self.lock();
        self.clear_lines();
        self.spawn(seq)
    }

    /// One gravity evaluation at counter reading `now`.
    ///
    /// `lock_delay` is in counter ticks; elapsed time is measured with
    /// wrapping subtraction so counter rollover is harmless. A piece that
    /// already overlaps the grid (pushed into the stack by garbage) tops out.
    pub fn apply_gravity(&mut self, now: u32, lock_delay: u32, seq: &PieceSequence) -> GravityStep {
        if self.topped_out {
            return GravityStep::ToppedOut;
        }
        if self.collides(self.active.x, self.active.y) {
            self.topped_out = true;
            self.lock_timer = None;
            return GravityStep::ToppedOut;
        }
        if !self.blocked_below() {
            self.active.y += 1;
            self.lock_timer = None;
            return GravityStep::Fell;
        }
        match self.lock_timer {
            None => {
                self.lock_timer = Some(now);
                GravityStep::LockStarted
            }
            Some(start) if now.wrapping_sub(start) >= lock_delay => {
                self.lock();
                self.clear_lines();
                match self.spawn(seq) {
                    SpawnStatus::Spawned => GravityStep::Locked,
                    SpawnStatus::ToppedOut => GravityStep::ToppedOut,
                }
            }
            Some(_) => GravityStep::LockPending,
        }
    }

    /// Write the active piece into the grid and stop the lock timer
    pub fn lock(&mut self) {
        let p = self.active;
        self.board.lock_shape(p.kind, p.rotation, p.x, p.y);
        self.lock_timer = None;
    }

    /// Compact full rows, credit score and queue the attack for this clear.
    pub fn clear_lines(&mut self) -> u8 {
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.lines_this_tick += u32::from(cleared);
            self.total_lines += u32::from(cleared);
            self.score += line_score(cleared);
            self.pending_attack = self
                .pending_attack
                .saturating_add(garbage_from_lines(cleared));
        }
        cleared
    }

    /// Lowest row the active piece could reach from where it is
    pub fn ghost_y(&self) -> i8 {
        let mut y = self.active.y;
        while !self.collides(self.active.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Move the active piece up after garbage rows were pushed in, never above row 0
    pub fn raise_active(&mut self, rows: u8) {
        self.active.y = (i16::from(self.active.y) - i16::from(rows)).max(0) as i8;
    }

    /// Take the attack queued since the last gravity tick
    pub fn take_attack(&mut self) -> u8 {
        std::mem::take(&mut self.pending_attack)
    }

    /// Reset the per-interval line counter
    pub fn reset_tick_lines(&mut self) {
        self.lines_this_tick = 0;
    }
}
