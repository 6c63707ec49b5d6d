//! In-memory framebuffer of colored glyph cells.

use glyph_loop_input::CellMapper;
use glyph_loop_types::{GridSize, Rgb};

use crate::sink::DrawSink;

/// A single displayed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

/// 2D framebuffer of glyph cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            presented: 0,
        }
    }

    pub fn with_size(size: GridSize) -> Self {
        Self::new(size.width, size.height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Glyphs of row `y` as a string. Empty when `y` is out of range.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Number of completed frames presented to this buffer.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl DrawSink for FrameBuffer {
    fn draw(&mut self, x: u16, y: u16, glyph: char, fg: Rgb, bg: Rgb) {
        self.set(x, y, Cell { ch: glyph, fg, bg });
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Pixels are cells; anything outside the buffer is off-grid.
impl CellMapper for FrameBuffer {
    fn map_pixel_to_cell(&self, px: i32, py: i32) -> Option<(u16, u16)> {
        let x = u16::try_from(px).ok()?;
        let y = u16::try_from(py).ok()?;
        self.idx(x, y).map(|_| (x, y))
    }
}
