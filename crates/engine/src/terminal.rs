//! Virtual terminal: the glyph buffer the dungeon draws into.
//!
//! Colors are kept symbolic (palette entries or the terminal default) while
//! drawing and resolved to packed RGB only when a cell is queried.

use glyph_loop_types::{GridCell, GridSize, Rgb};

/// The eight base palette hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Symbolic cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Whatever the host considers default (white text on black).
    TerminalDefault,
    Dark(BaseColor),
    Light(BaseColor),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Concrete RGB value, `None` for [`Color::TerminalDefault`].
    pub fn to_rgb(self) -> Option<Rgb> {
        use BaseColor::*;

        let (r, g, b) = match self {
            Color::TerminalDefault => return None,
            Color::Dark(base) => match base {
                Black => (0x00, 0x00, 0x00),
                Red => (0x80, 0x00, 0x00),
                Green => (0x00, 0x80, 0x00),
                Yellow => (0x80, 0x80, 0x00),
                Blue => (0x00, 0x00, 0x80),
                Magenta => (0x80, 0x00, 0x80),
                Cyan => (0x00, 0x80, 0x80),
                White => (0xc0, 0xc0, 0xc0),
            },
            Color::Light(base) => match base {
                Black => (0x80, 0x80, 0x80),
                Red => (0xff, 0x00, 0x00),
                Green => (0x00, 0xff, 0x00),
                Yellow => (0xff, 0xff, 0x00),
                Blue => (0x00, 0x00, 0xff),
                Magenta => (0xff, 0x00, 0xff),
                Cyan => (0x00, 0xff, 0xff),
                White => (0xff, 0xff, 0xff),
            },
            Color::Rgb(r, g, b) => (r, g, b),
        };
        Some(Rgb::new(r, g, b))
    }
}

/// Foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub front: Color,
    pub back: Color,
}

impl ColorPair {
    pub const DEFAULT: Self = Self::new(Color::TerminalDefault, Color::TerminalDefault);

    pub const fn new(front: Color, back: Color) -> Self {
        Self { front, back }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub colors: ColorPair,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            colors: ColorPair::DEFAULT,
        }
    }
}

/// Fixed-size glyph buffer.
#[derive(Debug, Clone, Default)]
pub struct VirtualTerminal {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl VirtualTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize and blank the whole buffer.
    pub fn resize(&mut self, size: GridSize) {
        self.width = size.width;
        self.height = size.height;
        self.glyphs.clear();
        self.glyphs.resize(size.area(), Glyph::default());
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Fill every cell with a blank glyph on `back`.
    pub fn clear(&mut self, back: Color) {
        self.glyphs.fill(Glyph {
            ch: ' ',
            colors: ColorPair::new(Color::TerminalDefault, back),
        });
    }

    /// Write one glyph. Off-screen writes are clipped.
    pub fn put(&mut self, x: i32, y: i32, ch: char, colors: ColorPair) {
        if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
            return;
        }
        if let Some(i) = self.idx(x as u16, y as u16) {
            self.glyphs[i] = Glyph { ch, colors };
        }
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn print(&mut self, x: i32, y: i32, s: &str, colors: ColorPair) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x + i as i32, y, ch, colors);
        }
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    /// Cell with colors resolved. Out-of-bounds reads return a blank cell.
    pub fn cell(&self, x: u16, y: u16) -> GridCell {
        let glyph = self.glyph(x, y).unwrap_or_default();
        let fg = glyph.colors.front.to_rgb().unwrap_or(Rgb::WHITE);
        let bg = glyph.colors.back.to_rgb().unwrap_or(Rgb::BLACK);
        GridCell::new(glyph.ch, fg.packed(), bg.packed())
    }
}
