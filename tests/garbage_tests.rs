//! Garbage exchange tests

use duel_tetris::core::{
    exchange, garbage_from_lines, inject_garbage, line_score, ActivePiece, GravityStep, Lcg,
    PieceSequence, PlayerState,
};
use duel_tetris::types::{MatchMods, PieceKind, Rotation, BOARD_WIDTH, EMPTY, GARBAGE_COLOR};

fn players() -> (PieceSequence, [PlayerState; 2]) {
    let seq = PieceSequence::generate(&mut Lcg::new(99));
    let p = PlayerState::new(&seq);
    (seq, [p.clone(), p])
}

/// Set up `lines` nearly full rows at the bottom and lock a vertical I into the gap.
fn clear_with_i(player: &mut PlayerState, lines: i8) -> u8 {
    for y in 20 - lines..20 {
        for x in 0..9 {
            player.board_mut().set(x, y, GARBAGE_COLOR);
        }
    }
    player.set_active(ActivePiece {
        kind: PieceKind::I,
        rotation: Rotation::East,
        x: 7,
        y: 16,
    });
    player.lock();
    player.clear_lines()
}

fn holes(player: &PlayerState, y: i8) -> Vec<i8> {
    (0..BOARD_WIDTH as i8)
        .filter(|&x| player.board().get(x, y) == Some(EMPTY))
        .collect()
}

#[test]
fn test_tables() {
    assert_eq!([0, 1, 2, 3, 4].map(garbage_from_lines), [0, 0, 1, 2, 4]);
    assert_eq!([0, 1, 2, 3, 4].map(line_score), [0, 100, 300, 500, 800]);
}

#[test]
fn test_four_lines_send_four_rows() {
    let (_, mut ps) = players();
    assert_eq!(clear_with_i(&mut ps[0], 4), 4);
    assert_eq!(ps[0].pending_attack(), 4);
    assert_eq!(ps[0].score(), 800);

    let target = ActivePiece {
        y: 10,
        ..ps[1].active()
    };
    ps[1].set_active(target);

    let received = exchange(&mut ps, &MatchMods::default(), &mut Lcg::new(5));
    assert_eq!(received, [0, 4]);
    assert_eq!(ps[1].active().y, 6);
    assert_eq!(ps[0].lines_this_tick(), 0);
    assert_eq!(ps[0].pending_attack(), 0);

    let hole = holes(&ps[1], 19);
    assert_eq!(hole.len(), 1);
    for y in 16..20 {
        assert_eq!(holes(&ps[1], y), hole, "row {y}");
        let garbage = (0..10).filter(|&x| ps[1].board().get(x, y) == Some(GARBAGE_COLOR)).count();
        assert_eq!(garbage, 9);
    }
    assert_eq!(holes(&ps[1], 15).len(), BOARD_WIDTH as usize);
}

#[test]
fn test_raise_clamps_at_top() {
    let (seq, mut ps) = players();
    clear_with_i(&mut ps[0], 4);
    let target = ActivePiece {
        y: 2,
        ..ps[1].active()
    };
    ps[1].set_active(target);

    exchange(&mut ps, &MatchMods::default(), &mut Lcg::new(5));
    assert_eq!(ps[1].active().y, 0);
    // Clear of the stack, so play goes on.
    assert!(!ps[1].topped_out());
    assert_ne!(ps[1].apply_gravity(0, 500, &seq), GravityStep::ToppedOut);
}

#[test]
fn test_piece_pushed_into_stack_tops_out_next_gravity_tick() {
    let (seq, mut ps) = players();
    clear_with_i(&mut ps[0], 4);
    ps[1].set_active(ActivePiece {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: 3,
        y: 1,
    });
    // Four garbage rows lift this cell to row 0, under the clamped piece.
    ps[1].board_mut().set(3, 4, GARBAGE_COLOR);

    exchange(&mut ps, &MatchMods::default(), &mut Lcg::new(5));
    let piece = ps[1].active();
    assert_eq!(piece.y, 0);
    assert!(ps[1].collides(piece.x, piece.y));
    assert!(!ps[1].topped_out());

    assert_eq!(ps[1].apply_gravity(1_000, 500, &seq), GravityStep::ToppedOut);
    assert!(ps[1].topped_out());
    assert_eq!(ps[1].lock_timer(), None);
}

#[test]
fn test_simultaneous_clears_are_symmetric() {
    let (_, mut ps) = players();
    assert_eq!(clear_with_i(&mut ps[0], 2), 2);
    assert_eq!(clear_with_i(&mut ps[1], 3), 3);

    let received = exchange(&mut ps, &MatchMods::default(), &mut Lcg::new(1));
    assert_eq!(received, [2, 1]);
}

#[test]
fn test_single_clear_sends_nothing() {
    let (_, mut ps) = players();
    assert_eq!(clear_with_i(&mut ps[0], 1), 1);
    assert_eq!(exchange(&mut ps, &MatchMods::default(), &mut Lcg::new(1)), [0, 0]);
    assert_eq!(ps[1].board().filled_count(), 0);
}

#[test]
fn test_disabled_garbage_discards_attack() {
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
        let (_, mut ps) = players();
        clear_with_i(&mut ps[0], 4);
        assert_eq!(exchange(&mut ps, &mods, &mut Lcg::new(3)), [0, 0]);
        assert_eq!(ps[1].board().filled_count(), 0);
        assert_eq!(ps[0].pending_attack(), 0);
    }
}

#[test]
fn test_messy_rows_each_have_one_hole() {
    let (_, mut ps) = players();
    inject_garbage(&mut ps[1], 6, &mut Lcg::new(77), true);
    for y in 14..20 {
        assert_eq!(holes(&ps[1], y).len(), 1, "row {y}");
    }
}

#[test]
fn test_clean_injection_draws_one_hole() {
    let (_, mut ps) = players();
    let mut rng = Lcg::new(77);
    let expected = Lcg::new(77).next_below(10) as i8;
    inject_garbage(&mut ps[1], 3, &mut rng, false);
    for y in 17..20 {
        assert_eq!(holes(&ps[1], y), vec![expected]);
    }
}
