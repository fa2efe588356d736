//! Screen: pushes a [`Canvas`] to the real terminal.
//!
//! Only cells that differ from the previously presented canvas are rewritten.
//! A size change (or [`Screen::invalidate`]) forces one full repaint.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Ink, Rgb};

pub struct Screen {
    out: io::Stdout,
    shown: Canvas,
    valid: bool,
    bytes: Vec<u8>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: Canvas::new(0, 0),
            valid: false,
            bytes: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode plus alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Undo [`Screen::enter`]. Safe to call after a failed draw.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Present `canvas`. The caller's canvas is swapped with the previously
    /// shown one, so it holds stale content afterwards and must be redrawn.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.bytes.clear();
        let same_size =
            self.shown.width() == canvas.width() && self.shown.height() == canvas.height();
        if self.valid && same_size {
            encode_changes(&self.shown, canvas, &mut self.bytes)?;
        } else {
            encode_all(canvas, &mut self.bytes)?;
            self.valid = true;
        }
        self.write_out()?;
        std::mem::swap(&mut self.shown, canvas);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Full repaint of `canvas` as terminal commands
pub fn encode_all(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..canvas.width() {
            let glyph = canvas.get(x, y).unwrap_or_default();
            set_ink(out, &mut pen, glyph.ink)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Rewrite only the cells of `next` that differ from `prev`. Both canvases
/// must have the same size.
pub fn encode_changes(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    for (y, start, end) in changed_spans(prev, next) {
        out.queue(cursor::MoveTo(start, y))?;
        for x in start..end {
            let glyph = next.get(x, y).unwrap_or_default();
            set_ink(out, &mut pen, glyph.ink)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

fn set_ink(out: &mut Vec<u8>, pen: &mut Option<Ink>, ink: Ink) -> Result<()> {
    if *pen != Some(ink) {
        out.queue(SetForegroundColor(color(ink.fg)))?;
        out.queue(SetBackgroundColor(color(ink.bg)))?;
        *pen = Some(ink);
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal spans `(row, start, end)` of differing cells, adjacent cells merged.
fn changed_spans(prev: &Canvas, next: &Canvas) -> Vec<(u16, u16, u16)> {
    let mut spans = Vec::new();
    for y in 0..next.height() {
        let mut open: Option<u16> = None;
        for x in 0..next.width() {
            let differs = prev.get(x, y) != next.get(x, y);
            match (differs, open) {
                (true, None) => open = Some(x),
                (false, Some(start)) => {
                    spans.push((y, start, x));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            spans.push((y, start, next.width()));
        }
    }
    spans
}
