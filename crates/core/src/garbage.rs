//! Garbage module - cross-player attack rows
//!
//! Attacks are queued on the clearing player by [`PlayerState::clear_lines`]
//! and exchanged once per gravity tick, after both players have settled.

use crate::player::PlayerState;
use crate::rng::Lcg;
use crate::types::{MatchMods, BOARD_WIDTH};

/// Push `rows` garbage rows into the bottom of `player`'s grid.
///
/// One hole column is drawn per call; with `messy` set every row after the
/// first draws its own. The falling piece is moved up by `rows`, clamped at
/// the top row; if it then overlaps the grid, it tops out on the owner's next
/// gravity tick.
pub fn inject_garbage(player: &mut PlayerState, rows: u8, rng: &mut Lcg, messy: bool) {
    if rows == 0 {
        return;
    }
    let width = u32::from(BOARD_WIDTH);
    let mut hole = rng.next_below(width) as u8;
    for row in 0..rows {
        if messy && row > 0 {
            hole = rng.next_below(width) as u8;
        }
        player.board_mut().push_garbage_row(hole);
    }
    player.raise_active(rows);
}

/// Settle one gravity interval for both players.
///
/// Both queued attacks are captured before either is applied, so simultaneous
/// clears hit each other symmetrically. Per-interval line counters are reset
/// afterwards. Returns the rows received by each player.
pub fn exchange(players: &mut [PlayerState; 2], mods: &MatchMods, rng: &mut Lcg) -> [u8; 2] {
    let attacks = [players[0].take_attack(), players[1].take_attack()];
    let mut received = [0u8; 2];

    if mods.garbage_enabled() {
        for (from, &rows) in attacks.iter().enumerate() {
            let to = 1 - from;
            inject_garbage(&mut players[to], rows, rng, mods.messy_garbage);
            received[to] = rows;
        }
    }

    for player in players.iter_mut() {
        player.reset_tick_lines();
    }
    received
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ActivePiece;
    use crate::rng::PieceSequence;
    use crate::types::{PieceKind, Rotation, EMPTY, GARBAGE_COLOR};

    fn setup() -> (PieceSequence, Lcg) {
        let mut rng = Lcg::new(99);
        let seq = PieceSequence::generate(&mut rng);
        (seq, rng)
    }

    fn hole_of(player: &PlayerState, y: i8) -> Vec<i8> {
        (0..10)
            .filter(|&x| player.board().get(x, y) == Some(EMPTY))
            .collect()
    }

    #[test]
    fn test_inject_single_hole_column() {
        let (seq, mut rng) = setup();
        let mut player = PlayerState::new(&seq);

        inject_garbage(&mut player, 3, &mut rng, false);

        let holes: Vec<Vec<i8>> = (17..20).map(|y| hole_of(&player, y)).collect();
        assert_eq!(holes[0].len(), 1);
        assert_eq!(holes[0], holes[1]);
        assert_eq!(holes[1], holes[2]);
        assert_eq!(player.board().filled_count(), 27);
        assert_eq!(player.board().get(holes[0][0] ^ 1, 19), Some(GARBAGE_COLOR));
    }

    #[test]
    fn test_messy_rows_each_have_one_hole() {
        let (seq, mut rng) = setup();
        let mut player = PlayerState::new(&seq);

        inject_garbage(&mut player, 4, &mut rng, true);

        for y in 16..20 {
            assert_eq!(hole_of(&player, y).len(), 1);
        }
    }

    #[test]
    fn test_exchange_is_symmetric() {
        let (seq, mut rng) = setup();
        let mut players = [PlayerState::new(&seq), PlayerState::new(&seq)];
        for player in players.iter_mut() {
            for y in 18..20 {
                for x in 0..10 {
                    player.board_mut().set(x, y, 1);
                }
            }
            assert_eq!(player.clear_lines(), 2);
        }

        let received = exchange(&mut players, &MatchMods::default(), &mut rng);

        assert_eq!(received, [1, 1]);
        for player in &players {
            assert_eq!(player.board().filled_count(), 9);
            assert_eq!(player.lines_this_tick(), 0);
            assert_eq!(player.pending_attack(), 0);
        }
    }

    #[test]
    fn test_exchange_respects_disable_and_single_player() {
        let (seq, mut rng) = setup();
        for mods in [
            MatchMods {
                garbage_disabled: true,
                ..MatchMods::default()
            },
            MatchMods {
                single_player: true,
                ..MatchMods::default()
            },
        ] {
            let mut players = [PlayerState::new(&seq), PlayerState::new(&seq)];
            for y in 16..20 {
                for x in 0..10 {
                    players[0].board_mut().set(x, y, 1);
                }
            }
            players[0].clear_lines();

            assert_eq!(exchange(&mut players, &mods, &mut rng), [0, 0]);
            assert_eq!(players[1].board().filled_count(), 0);
            assert_eq!(players[0].pending_attack(), 0);
        }
    }

    #[test]
    fn test_injection_lifts_active_piece() {
        let (seq, mut rng) = setup();
        let mut player = PlayerState::new(&seq);
        player.set_active(ActivePiece {
            kind: PieceKind::T,
            rotation: Rotation::North,
            x: 3,
            y: 10,
        });

        inject_garbage(&mut player, 4, &mut rng, false);
        assert_eq!(player.active().y, 6);
    }
}
