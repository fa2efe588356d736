//! The running match: both players, the shared sequence, and the two tick passes.
//!
//! All match state lives here rather than in globals, so several matches can
//! run side by side (tests do exactly that).
//!
//! Per [`Duel::step`]:
//!
//! 1. control tick: each player's pending key edges drive move, soft drop,
//!    rotate, hard drop and hold, in that order;
//! 2. gravity tick: both players fall or lock, then garbage is exchanged, then
//!    the gravity period is re-indexed from the combined line count.
//!
//! The match is over after the first pass in which a simulated player tops out.

use tracing::{debug, info, trace};

use crate::config::{EngineConfig, Timing};
use crate::core::{
    exchange, gravity_period_ms, render_frame, DisplaySurface, GravityStep, HoldOutcome, Lcg,
    PieceSequence, PlayerState,
};
use crate::input::{InputEvent, KeyLatch};
use crate::lobby::MatchStart;
use crate::scheduler::TickScheduler;
use crate::types::{Key, MatchMods, PlayerId};

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Winner(PlayerId),
    /// Both players topped out in the same pass
    Draw,
    /// Single-player match, player 1 topped out
    SoloOver,
}

/// Final result with per-player totals, indexed by [`PlayerId::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub scores: [u32; 2],
    pub lines: [u32; 2],
}

#[derive(Debug, Clone)]
pub struct Duel {
    players: [PlayerState; 2],
    simulated: [bool; 2],
    latches: [KeyLatch; 2],
    sequence: PieceSequence,
    rng: Lcg,
    mods: MatchMods,
    scheduler: TickScheduler,
    timing: Timing,
    auto_shift: bool,
    gravity_ms: u32,
}

impl Duel {
    /// Start a match at counter reading `now`.
    pub fn new(start: MatchStart, config: &EngineConfig, now: u32) -> Self {
        let mut rng = Lcg::new(start.seed);
        let sequence = PieceSequence::generate(&mut rng);
        let players = [PlayerState::new(&sequence), PlayerState::new(&sequence)];
        let timing = config.timing();
        let gravity_ms = gravity_period_ms(0, start.mods.fast_gravity);
        let scheduler = TickScheduler::new(
            timing.control_period,
            timing.ms_to_ticks(gravity_ms),
            now,
        );

        info!(seed = start.seed, mods = ?start.mods, "match started");

        Self {
            players,
            simulated: [true, !start.mods.single_player],
            latches: [KeyLatch::new(); 2],
            sequence,
            rng,
            mods: start.mods,
            scheduler,
            timing,
            auto_shift: config.auto_shift,
            gravity_ms,
        }
    }

    /// State of a simulated player; `None` for player 2 in single-player
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.simulated[id.index()].then(|| &self.players[id.index()])
    }

    /// Mutable player state, for scripted setups
    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    pub fn mods(&self) -> MatchMods {
        self.mods
    }

    pub fn sequence(&self) -> &PieceSequence {
        &self.sequence
    }

    pub fn gravity_period_ms(&self) -> u32 {
        self.gravity_ms
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Latch a gameplay key event. Lobby keys and unsimulated players are ignored.
    pub fn dispatch(&mut self, event: InputEvent) {
        let i = event.player.index();
        if !self.simulated[i] || !event.key.is_gameplay() {
            return;
        }
        self.latches[i].apply(event.key, event.state);
    }

    /// Run whichever ticks are due at `now`; returns the outcome once the match ends.
    pub fn step(&mut self, now: u32) -> Option<MatchOutcome> {
        let ticks = self.scheduler.poll(now);
        if ticks.control {
            self.control_pass();
            if let Some(outcome) = self.outcome() {
                return Some(outcome);
            }
        }
        if ticks.gravity {
            self.gravity_pass(now);
        }
        self.outcome()
    }

    /// Apply each player's key edges once.
    pub fn control_pass(&mut self) {
        for id in PlayerId::BOTH {
            let i = id.index();
            if !self.simulated[i] {
                continue;
            }
            let latch = &mut self.latches[i];
            let edges = latch.take_edges();
            let shift = |key: Key| edges.contains(key) || (self.auto_shift && latch.held(key));
            let (left, right) = (shift(Key::Left), shift(Key::Right));

            let player = &mut self.players[i];
            if left {
                player.move_horizontal(-1);
            }
            if right {
                player.move_horizontal(1);
            }
            if edges.contains(Key::SoftDrop) {
                player.soft_drop();
            }
            if edges.contains(Key::RotateCw) {
                player.rotate(true);
            }
            if edges.contains(Key::RotateCcw) {
                player.rotate(false);
            }
            if edges.contains(Key::HardDrop) && player.hard_drop(&self.sequence).is_topped_out() {
                info!(player = id.wire(), "topped out on hard drop");
                continue;
            }
            if edges.contains(Key::Hold) {
                match player.hold(&self.sequence, self.mods.hold_disabled) {
                    HoldOutcome::ToppedOut => info!(player = id.wire(), "topped out on hold"),
                    outcome => trace!(player = id.wire(), ?outcome, "hold"),
                }
            }
        }
    }

    /// Gravity for both players, then garbage exchange and speed re-index.
    pub fn gravity_pass(&mut self, now: u32) {
        for id in PlayerId::BOTH {
            let i = id.index();
            if !self.simulated[i] {
                continue;
            }
            let step = self.players[i].apply_gravity(now, self.timing.lock_delay, &self.sequence);
            if step == GravityStep::ToppedOut {
                info!(player = id.wire(), "topped out");
            }
        }

        let received = exchange(&mut self.players, &self.mods, &mut self.rng);
        for id in PlayerId::BOTH {
            let rows = received[id.index()];
            if rows > 0 {
                debug!(from = id.opponent().wire(), to = id.wire(), rows, "garbage sent");
            }
        }

        let total = self.players[0].total_lines() + self.players[1].total_lines();
        let gravity_ms = gravity_period_ms(total, self.mods.fast_gravity);
        if gravity_ms != self.gravity_ms {
            self.gravity_ms = gravity_ms;
            self.scheduler
                .set_gravity_period(self.timing.ms_to_ticks(gravity_ms));
            debug!(total_lines = total, gravity_ms, "gravity re-indexed");
        }
    }

    /// Result if the match is over
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let out = |i: usize| self.simulated[i] && self.players[i].topped_out();
        let result = match (out(0), out(1)) {
            (false, false) => return None,
            (true, true) => MatchResult::Draw,
            (true, false) if self.mods.single_player => MatchResult::SoloOver,
            (true, false) => MatchResult::Winner(PlayerId::Two),
            (false, true) => MatchResult::Winner(PlayerId::One),
        };
        Some(MatchOutcome {
            result,
            scores: [self.players[0].score(), self.players[1].score()],
            lines: [self.players[0].total_lines(), self.players[1].total_lines()],
        })
    }

    /// Write both boards and the hold/lookahead words.
    pub fn render<S: DisplaySurface>(&self, surface: &mut S) {
        render_frame([self.player(PlayerId::One), self.player(PlayerId::Two)], surface);
    }
}
