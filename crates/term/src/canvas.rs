//! Character canvas the viewer draws into before it is flushed to the terminal.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground/background pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Ink {
    pub const TEXT: Ink = Ink {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
    };

    pub const fn on_black(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
        }
    }
}

impl Default for Ink {
    fn default() -> Self {
        Self::TEXT
    }
}

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub ink: Ink,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            ink: Ink::TEXT,
        }
    }
}

/// Fixed-size grid of glyphs, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change size, reusing the allocation; contents become blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::default());
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Out-of-range writes are clipped.
    pub fn put(&mut self, x: u16, y: u16, ch: char, ink: Ink) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph { ch, ink };
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, ink: Ink) {
        for (dx, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else { break };
            self.put(x.saturating_add(dx), y, ch, ink);
        }
    }

    /// Single-line box outline
    pub fn frame(&mut self, x: u16, y: u16, w: u16, h: u16, ink: Ink) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        for cx in x + 1..right {
            self.put(cx, y, '─', ink);
            self.put(cx, bottom, '─', ink);
        }
        for cy in y + 1..bottom {
            self.put(x, cy, '│', ink);
            self.put(right, cy, '│', ink);
        }
        self.put(x, y, '┌', ink);
        self.put(right, y, '┐', ink);
        self.put(x, bottom, '└', ink);
        self.put(right, bottom, '┘', ink);
    }

    /// Text of row `y`, for tests and logs
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
