//! DuelView: draws the packed display words into a [`Canvas`].
//!
//! The view reads only what the firmware display would see (the packed board
//! and hold/lookahead words) plus a small [`Hud`] with text-only facts such as
//! scores. Each board cell is two characters wide.

use crate::canvas::{Canvas, Ink, Rgb};
use crate::core::pieces::get_shape;
use crate::core::PackedFrame;
use crate::types::{
    MatchMods, PieceKind, PlayerId, Rotation, BOARD_HEIGHT, BOARD_WIDTH, GARBAGE_COLOR,
    GHOST_COLOR, HOLD_EMPTY_NIBBLE, LOOKAHEAD_LEN,
};

const BOARD_W: u16 = BOARD_WIDTH as u16 * 2 + 2;
const BOARD_H: u16 = BOARD_HEIGHT as u16 + 2;
const PANEL_W: u16 = 12;
const PLAYER_W: u16 = BOARD_W + PANEL_W + 2;

/// Minimum canvas size for the full layout
pub const VIEW_WIDTH: u16 = PLAYER_W * 2;
pub const VIEW_HEIGHT: u16 = BOARD_H + 3;

/// Match phase as shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HudPhase {
    #[default]
    Lobby,
    Playing,
    Won(PlayerId),
    Draw,
    SoloOver,
}

/// Text shown around the boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub phase: HudPhase,
    pub ready: [bool; 2],
    pub mods: MatchMods,
    pub scores: [u32; 2],
    pub lines: [u32; 2],
}

/// Color for a display nibble
pub fn nibble_rgb(value: u8) -> Rgb {
    match value {
        1 => Rgb::new(80, 220, 100),  // S
        2 => Rgb::new(70, 110, 240),  // J
        3 => Rgb::new(245, 160, 40),  // L
        4 => Rgb::new(60, 220, 230),  // I
        5 => Rgb::new(190, 90, 230),  // T
        6 => Rgb::new(240, 220, 60),  // O
        7 => Rgb::new(235, 70, 70),   // Z
        GARBAGE_COLOR => Rgb::new(130, 130, 130),
        GHOST_COLOR => Rgb::new(90, 90, 90),
        _ => Rgb::new(40, 40, 40),
    }
}

fn cell_glyphs(value: u8) -> (char, char, Ink) {
    let ink = Ink::on_black(nibble_rgb(value));
    match value {
        0 => (' ', '.', ink),
        GHOST_COLOR => ('░', '░', ink),
        _ => ('█', '█', ink),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuelView;

impl DuelView {
    /// Redraw everything. The canvas is cleared first.
    pub fn render(&self, frame: &PackedFrame, hud: &Hud, canvas: &mut Canvas) {
        canvas.clear();
        self.draw_status(hud, canvas);
        for player in PlayerId::BOTH {
            let x = player.index() as u16 * PLAYER_W;
            self.draw_board(frame, player, x, canvas);
            self.draw_panel(frame, hud, player, x + BOARD_W + 1, canvas);
        }
        canvas.put_str(
            0,
            VIEW_HEIGHT - 1,
            "P1 a/d w/q s spc c tab   P2 ←/→ ↑/, ↓ / . enter   mods 1-5   esc quit",
            Ink::on_black(Rgb::new(120, 120, 120)),
        );
    }

    fn draw_status(&self, hud: &Hud, canvas: &mut Canvas) {
        let text = match hud.phase {
            HudPhase::Lobby => format!(
                "DUEL TETRIS  lobby  P1 {}  P2 {}  {}",
                ready_text(hud.ready[0]),
                ready_text(hud.ready[1]),
                mods_text(&hud.mods),
            ),
            HudPhase::Playing => format!("DUEL TETRIS  playing  {}", mods_text(&hud.mods)),
            HudPhase::Won(p) => format!("DUEL TETRIS  player {} wins", p.wire()),
            HudPhase::Draw => "DUEL TETRIS  draw".to_string(),
            HudPhase::SoloOver => "DUEL TETRIS  game over".to_string(),
        };
        canvas.put_str(0, 0, &text, Ink::TEXT);
    }

    fn draw_board(&self, frame: &PackedFrame, player: PlayerId, x0: u16, canvas: &mut Canvas) {
        let y0 = 1;
        canvas.frame(x0, y0, BOARD_W, BOARD_H, Ink::TEXT);
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                let (a, b, ink) = cell_glyphs(frame.cell(player, x, y));
                let cx = x0 + 1 + x as u16 * 2;
                let cy = y0 + 1 + y as u16;
                canvas.put(cx, cy, a, ink);
                canvas.put(cx + 1, cy, b, ink);
            }
        }
    }

    fn draw_panel(&self, frame: &PackedFrame, hud: &Hud, player: PlayerId, x0: u16, canvas: &mut Canvas) {
        let i = player.index();
        let base = i * (1 + LOOKAHEAD_LEN);

        canvas.put_str(x0, 2, &format!("P{}", player.wire()), Ink::TEXT);
        canvas.put_str(x0, 3, "HOLD", Ink::TEXT);
        draw_mini(canvas, x0, 4, frame.hold_next_slot(base));

        canvas.put_str(x0, 7, "NEXT", Ink::TEXT);
        for n in 0..LOOKAHEAD_LEN {
            draw_mini(canvas, x0, 8 + n as u16 * 2, frame.hold_next_slot(base + 1 + n));
        }

        canvas.put_str(x0, 19, &format!("SCORE {}", hud.scores[i]), Ink::TEXT);
        canvas.put_str(x0, 20, &format!("LINES {}", hud.lines[i]), Ink::TEXT);
    }
}

/// Two-row preview of a piece in spawn orientation; 0xF draws nothing.
fn draw_mini(canvas: &mut Canvas, x0: u16, y0: u16, id: u8) {
    if id == HOLD_EMPTY_NIBBLE {
        return;
    }
    let Some(kind) = PieceKind::from_index(id) else {
        return;
    };
    let shape = get_shape(kind, Rotation::North);
    let ink = Ink::on_black(nibble_rgb(kind.color()));
    for (row, line) in shape.iter().take(2).enumerate() {
        for (col, &cell) in line.iter().enumerate() {
            if cell != 0 {
                let x = x0 + col as u16 * 2;
                canvas.put(x, y0 + row as u16, '█', ink);
                canvas.put(x + 1, y0 + row as u16, '█', ink);
            }
        }
    }
}

fn ready_text(ready: bool) -> &'static str {
    if ready {
        "ready"
    } else {
        "waiting"
    }
}

fn mods_text(mods: &MatchMods) -> String {
    let flags = [
        (mods.hold_disabled, "no-hold"),
        (mods.fast_gravity, "fast"),
        (mods.messy_garbage, "messy"),
        (mods.garbage_disabled, "no-garbage"),
        (mods.single_player, "solo"),
    ];
    let on: Vec<&str> = flags.iter().filter(|(set, _)| *set).map(|(_, n)| *n).collect();
    if on.is_empty() {
        "mods: none".to_string()
    } else {
        format!("mods: {}", on.join(" "))
    }
}
