//! Builds the viewer's text overlay from the console phase.

use crate::engine::{MatchOutcome, MatchResult, Phase};
use crate::term::{Hud, HudPhase};
use crate::types::PlayerId;

pub fn hud_for(phase: &Phase) -> Hud {
    match phase {
        Phase::Lobby(lobby) => Hud {
            phase: HudPhase::Lobby,
            ready: PlayerId::BOTH.map(|p| lobby.is_ready(p)),
            mods: lobby.mods(),
            ..Hud::default()
        },
        Phase::Playing(duel) => Hud {
            phase: HudPhase::Playing,
            ready: [true, true],
            mods: duel.mods(),
            scores: PlayerId::BOTH.map(|p| duel.player(p).map_or(0, |s| s.score())),
            lines: PlayerId::BOTH.map(|p| duel.player(p).map_or(0, |s| s.total_lines())),
        },
        Phase::Over(outcome) => finished(outcome),
    }
}

fn finished(outcome: &MatchOutcome) -> Hud {
    let phase = match outcome.result {
        MatchResult::Winner(p) => HudPhase::Won(p),
        MatchResult::Draw => HudPhase::Draw,
        MatchResult::SoloOver => HudPhase::SoloOver,
    };
    Hud {
        phase,
        ready: [true, true],
        scores: outcome.scores,
        lines: outcome.lines,
        ..Hud::default()
    }
}
