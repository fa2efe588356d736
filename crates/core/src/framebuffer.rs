//! Framebuffer encoder - packs boards and previews into display words
//!
//! Every render pass writes all 25 words of both board regions plus the two
//! hold/lookahead words, whether or not anything changed. Cells are 4-bit
//! nibbles, eight per word, row-major, first cell in the top nibble.

use crate::pieces::shape_cell;
use crate::player::PlayerState;
use crate::surface::DisplaySurface;
use crate::types::{
    Cell, PlayerId, BOARD_WIDTH, CELLS_PER_WORD, EMPTY, GHOST_COLOR, HOLD_EMPTY_NIBBLE,
    HOLD_NEXT_WORDS, LOOKAHEAD_LEN, WORDS_PER_BOARD,
};

/// Pack up to eight 4-bit values, first one in the most significant nibble
pub fn pack_nibbles(values: &[u8]) -> u32 {
    values
        .iter()
        .take(CELLS_PER_WORD)
        .enumerate()
        .fold(0u32, |word, (i, &v)| {
            word | (u32::from(v & 0xF) << (4 * (CELLS_PER_WORD - 1 - i)))
        })
}

/// Rendered value of one cell: locked color, else active piece, else ghost, else empty.
///
/// `ghost_y` is the landing row of the active piece, computed once per pass.
pub fn render_cell(player: &PlayerState, ghost_y: i8, x: i8, y: i8) -> Cell {
    if let Some(locked) = player.board().get(x, y) {
        if locked != EMPTY {
            return locked;
        }
    }
    let piece = player.active();
    let color = shape_cell(piece.kind, piece.rotation, x - piece.x, y - piece.y);
    if color != EMPTY {
        return color;
    }
    if shape_cell(piece.kind, piece.rotation, x - piece.x, y - ghost_y) != EMPTY {
        return GHOST_COLOR;
    }
    EMPTY
}

/// Write one player's 25 board words. `None` renders an empty board.
pub fn encode_board<S: DisplaySurface>(
    player: Option<&PlayerState>,
    id: PlayerId,
    surface: &mut S,
) {
    let Some(player) = player else {
        for index in 0..WORDS_PER_BOARD {
            surface.write_board_word(id, index, 0);
        }
        return;
    };

    let ghost_y = player.ghost_y();
    let width = BOARD_WIDTH as usize;
    let mut cells = [EMPTY; CELLS_PER_WORD];
    for index in 0..WORDS_PER_BOARD {
        for (slot, cell) in cells.iter_mut().enumerate() {
            let i = index * CELLS_PER_WORD + slot;
            *cell = render_cell(player, ghost_y, (i % width) as i8, (i / width) as i8);
        }
        surface.write_board_word(id, index, pack_nibbles(&cells));
    }
}

fn preview_slots(player: Option<&PlayerState>) -> [u8; 1 + LOOKAHEAD_LEN] {
    let mut out = [HOLD_EMPTY_NIBBLE; 1 + LOOKAHEAD_LEN];
    if let Some(player) = player {
        out[0] = player
            .hold_piece()
            .map_or(HOLD_EMPTY_NIBBLE, |kind| kind.index());
        for (slot, kind) in out[1..].iter_mut().zip(player.lookahead()) {
            *slot = kind.index();
        }
    }
    out
}

/// Write the two hold/lookahead words.
///
/// Layout: `[p1.hold, p1.next0..4, p2.hold, p2.next0]`, then
/// `[p2.next1..4, 0, 0, 0, 0]`. Values are piece ids; an empty hold (or an
/// unsimulated player) shows 0xF.
pub fn encode_hold_next<S: DisplaySurface>(players: [Option<&PlayerState>; 2], surface: &mut S) {
    let mut slots = [0u8; HOLD_NEXT_WORDS * CELLS_PER_WORD];
    slots[..6].copy_from_slice(&preview_slots(players[0]));
    slots[6..12].copy_from_slice(&preview_slots(players[1]));

    for (index, chunk) in slots.chunks(CELLS_PER_WORD).enumerate() {
        surface.write_hold_next_word(index, pack_nibbles(chunk));
    }
}

/// A full render pass: both boards, then the preview words.
pub fn render_frame<S: DisplaySurface>(players: [Option<&PlayerState>; 2], surface: &mut S) {
    for id in PlayerId::BOTH {
        encode_board(players[id.index()], id, surface);
    }
    encode_hold_next(players, surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ActivePiece;
    use crate::rng::{Lcg, PieceSequence};
    use crate::surface::PackedFrame;
    use crate::types::{PieceKind, Rotation};

    fn player() -> (PieceSequence, PlayerState) {
        let seq = PieceSequence::generate(&mut Lcg::new(5));
        let state = PlayerState::new(&seq);
        (seq, state)
    }

    #[test]
    fn test_pack_nibbles_order() {
        assert_eq!(pack_nibbles(&[1, 2, 3, 4, 5, 6, 7, 8]), 0x1234_5678);
        assert_eq!(pack_nibbles(&[0xF]), 0xF000_0000);
        assert_eq!(pack_nibbles(&[]), 0);
    }

    #[test]
    fn test_active_and_ghost_overlay() {
        let (_, mut state) = player();
        state.set_active(ActivePiece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        });
        let mut frame = PackedFrame::new();
        encode_board(Some(&state), PlayerId::One, &mut frame);

        assert_eq!(frame.cell(PlayerId::One, 0, 0), PieceKind::O.color());
        assert_eq!(frame.cell(PlayerId::One, 1, 1), PieceKind::O.color());
        assert_eq!(frame.cell(PlayerId::One, 0, 18), GHOST_COLOR);
        assert_eq!(frame.cell(PlayerId::One, 1, 19), GHOST_COLOR);
        assert_eq!(frame.cell(PlayerId::One, 2, 19), EMPTY);
    }

    #[test]
    fn test_locked_cells_win_over_overlay() {
        let (_, mut state) = player();
        state.board_mut().set(0, 0, 8);
        state.set_active(ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 1,
            y: 0,
        });
        let mut frame = PackedFrame::new();
        encode_board(Some(&state), PlayerId::Two, &mut frame);

        assert_eq!(frame.cell(PlayerId::Two, 0, 0), 8);
        assert_eq!(frame.cell(PlayerId::Two, 1, 0), PieceKind::I.color());
        assert_eq!(frame.cell(PlayerId::Two, 4, 19), GHOST_COLOR);
        // Board grid itself never stores the overlay.
        assert_eq!(state.board().filled_count(), 1);
    }

    #[test]
    fn test_missing_player_renders_empty() {
        let mut frame = PackedFrame::new();
        frame.write_board_word(PlayerId::Two, 3, 0x1111_1111);
        encode_board(None, PlayerId::Two, &mut frame);
        assert!(frame.board_words(PlayerId::Two).iter().all(|&w| w == 0));
    }

    #[test]
    fn test_hold_next_layout() {
        let (seq, mut p1) = player();
        let p2 = PlayerState::new(&seq);
        let _ = p1.hold(&seq, false);
        let held = p1.hold_piece().map(|k| k.index());

        let mut frame = PackedFrame::new();
        encode_hold_next([Some(&p1), Some(&p2)], &mut frame);

        assert_eq!(Some(frame.hold_next_slot(0)), held);
        for i in 0..LOOKAHEAD_LEN {
            assert_eq!(frame.hold_next_slot(1 + i), p1.lookahead()[i].index());
            assert_eq!(frame.hold_next_slot(7 + i), p2.lookahead()[i].index());
        }
        assert_eq!(frame.hold_next_slot(6), HOLD_EMPTY_NIBBLE);
        assert_eq!(frame.hold_next_words()[1] & 0xFFFF, 0);
    }
}
