//! Pre-match handshake.
//!
//! Players press ready; either player may flip mod toggles until the match
//! starts. The counter reading at each player's first ready press seeds the
//! match, so the piece order is fixed by those readings and nothing else.

use tracing::{debug, info};

use crate::input::{InputEvent, KeyLatch};
use crate::types::{Key, KeyState, MatchMods, PlayerId};

/// Seed and rules for a new match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStart {
    pub seed: u32,
    pub mods: MatchMods,
}

/// What a lobby event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyEvent {
    Ready(PlayerId),
    ModToggled(MatchMods),
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct Lobby {
    ready: [Option<u32>; 2],
    mods: MatchMods,
    keys: [KeyLatch; 2],
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one event at counter reading `now`. Only fresh presses count;
    /// releases, repeats of a held key and gameplay keys are ignored.
    pub fn handle(&mut self, event: InputEvent, now: u32) -> LobbyEvent {
        let keys = &mut self.keys[event.player.index()];
        let fresh = !keys.held(event.key);
        keys.apply(event.key, event.state);
        if event.state != KeyState::Pressed || !fresh {
            return LobbyEvent::Ignored;
        }
        match event.key {
            Key::Ready => {
                let slot = &mut self.ready[event.player.index()];
                if slot.is_some() {
                    return LobbyEvent::Ignored;
                }
                *slot = Some(now);
                info!(player = event.player.wire(), "player ready");
                LobbyEvent::Ready(event.player)
            }
            key => {
                if !self.mods.toggle(key) {
                    return LobbyEvent::Ignored;
                }
                debug!(?key, mods = ?self.mods, "mod toggled");
                LobbyEvent::ModToggled(self.mods)
            }
        }
    }

    pub fn is_ready(&self, player: PlayerId) -> bool {
        self.ready[player.index()].is_some()
    }

    pub fn mods(&self) -> MatchMods {
        self.mods
    }

    /// The match start once everyone needed is ready.
    ///
    /// Two players: seed is the wrapping sum of both ready readings. Single
    /// player: only player 1 must be ready and its reading is the seed.
    pub fn start(&self) -> Option<MatchStart> {
        let seed = if self.mods.single_player {
            self.ready[0]?
        } else {
            self.ready[0]?.wrapping_add(self.ready[1]?)
        };
        Some(MatchStart {
            seed,
            mods: self.mods,
        })
    }
}
