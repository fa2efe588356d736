//! The cooperative main loop.
//!
//! Each iteration: drain every pending input byte, run at most one control and
//! one gravity pass, then render. Nothing blocks. The loop ends when the match
//! has an outcome.

use tracing::{info, trace, warn};

use crate::clock::TickCounter;
use crate::config::EngineConfig;
use crate::core::{render_frame, DisplaySurface};
use crate::duel::{Duel, MatchOutcome};
use crate::input::{ByteSource, EventDecoder, KeyMirror};
use crate::lobby::Lobby;
use crate::types::PlayerId;

/// Key mirror that logs every accepted key code at trace level
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceMirror;

impl KeyMirror for TraceMirror {
    fn mirror(&mut self, player: PlayerId, key_code: u8) {
        trace!(player = player.wire(), key_code, "key mirrored");
    }
}

/// Where the console is in its lifecycle
#[derive(Debug)]
pub enum Phase {
    Lobby(Lobby),
    Playing(Box<Duel>),
    Over(MatchOutcome),
}

pub struct Console<S, D, M = ()> {
    source: S,
    surface: D,
    mirror: M,
    decoder: EventDecoder,
    config: EngineConfig,
    phase: Phase,
    dropped_seen: u64,
}

impl<S, D, M> Console<S, D, M>
where
    S: ByteSource,
    D: DisplaySurface,
    M: KeyMirror,
{
    pub fn new(source: S, surface: D, mirror: M, config: EngineConfig) -> Self {
        Self {
            source,
            surface,
            mirror,
            decoder: EventDecoder::new(config.dedup),
            config,
            phase: Phase::Lobby(Lobby::new()),
            dropped_seen: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn duel(&self) -> Option<&Duel> {
        match &self.phase {
            Phase::Playing(duel) => Some(duel),
            _ => None,
        }
    }

    pub fn duel_mut(&mut self) -> Option<&mut Duel> {
        match &mut self.phase {
            Phase::Playing(duel) => Some(duel),
            _ => None,
        }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn report_drops(&mut self) {
        let dropped = self.source.dropped();
        if dropped != self.dropped_seen {
            warn!(
                dropped = dropped - self.dropped_seen,
                total = dropped,
                "input bytes lost to ring overflow"
            );
            self.dropped_seen = dropped;
        }
    }

    /// One loop iteration at counter reading `now`.
    pub fn run_iteration(&mut self, now: u32) -> Option<MatchOutcome> {
        let events = self.decoder.drain(&mut self.source, &mut self.mirror);
        self.report_drops();

        let next = match &mut self.phase {
            Phase::Lobby(lobby) => {
                for event in events {
                    lobby.handle(event, now);
                }
                render_frame([None, None], &mut self.surface);
                lobby
                    .start()
                    .map(|start| Phase::Playing(Box::new(Duel::new(start, &self.config, now))))
            }
            Phase::Playing(duel) => {
                for event in events {
                    duel.dispatch(event);
                }
                let outcome = duel.step(now);
                duel.render(&mut self.surface);
                outcome.map(|outcome| {
                    info!(
                        result = ?outcome.result,
                        scores = ?outcome.scores,
                        lines = ?outcome.lines,
                        "match over"
                    );
                    Phase::Over(outcome)
                })
            }
            Phase::Over(_) => None,
        };

        if let Some(phase) = next {
            self.phase = phase;
        }
        self.outcome()
    }

    /// Loop until the match ends.
    pub fn run<C: TickCounter>(&mut self, counter: &mut C) -> MatchOutcome {
        loop {
            if let Some(outcome) = self.run_iteration(counter.now()) {
                return outcome;
            }
        }
    }
}
