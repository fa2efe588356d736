//! JSON match report printed by the simulator once the terminal is restored.

use serde::{Deserialize, Serialize};

use crate::engine::{MatchOutcome, MatchResult};
use crate::types::MatchMods;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportResult {
    Winner,
    Draw,
    SoloOver,
    /// The simulator was quit before the match ended
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub result: ReportResult,
    /// Wire id (1 or 2) of the winner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<u8>,
    pub scores: [u32; 2],
    pub lines: [u32; 2],
    pub mods: Vec<String>,
    /// Input bytes lost to ring overflow
    pub dropped_bytes: u64,
}

impl MatchReport {
    pub fn new(outcome: Option<MatchOutcome>, mods: MatchMods, dropped_bytes: u64) -> Self {
        let (result, winner) = match outcome.map(|o| o.result) {
            Some(MatchResult::Winner(p)) => (ReportResult::Winner, Some(p.wire())),
            Some(MatchResult::Draw) => (ReportResult::Draw, None),
            Some(MatchResult::SoloOver) => (ReportResult::SoloOver, None),
            None => (ReportResult::Aborted, None),
        };
        Self {
            result,
            winner,
            scores: outcome.map_or([0; 2], |o| o.scores),
            lines: outcome.map_or([0; 2], |o| o.lines),
            mods: mod_names(mods),
            dropped_bytes,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn mod_names(mods: MatchMods) -> Vec<String> {
    [
        (mods.hold_disabled, "hold_disabled"),
        (mods.fast_gravity, "fast_gravity"),
        (mods.messy_garbage, "messy_garbage"),
        (mods.garbage_disabled, "garbage_disabled"),
        (mods.single_player, "single_player"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name.to_string())
    .collect()
}
