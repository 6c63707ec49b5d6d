//! TerminalRenderer: flushes the rendered grid to a real terminal.
//!
//! The renderer is a [`DrawSink`]: cells land in a back buffer and `present`
//! encodes the whole buffer in one write. Pointer events arrive in cell
//! coordinates, so the pixel mapping is the identity clipped to the grid.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use glyph_loop_input::CellMapper;
use glyph_loop_types::{GridSize, Rgb};

use crate::fb::{Cell, FrameBuffer};
use crate::sink::DrawSink;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    back: FrameBuffer,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new(size: GridSize) -> Self {
        Self {
            stdout: io::stdout(),
            back: FrameBuffer::with_size(size),
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Raw mode, alternate screen and mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        self.entered = false;
        Ok(())
    }

    /// The last drawn frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.back
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl DrawSink for TerminalRenderer {
    fn draw(&mut self, x: u16, y: u16, glyph: char, fg: Rgb, bg: Rgb) {
        self.back.draw(x, y, glyph, fg, bg);
    }

    fn present(&mut self) -> Result<()> {
        self.buf.clear();
        encode_full_into(&self.back, &mut self.buf)?;
        self.flush_buf()
    }
}

impl CellMapper for TerminalRenderer {
    fn map_pixel_to_cell(&self, px: i32, py: i32) -> Option<(u16, u16)> {
        self.back.map_pixel_to_cell(px, py)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out`.
///
/// Each row is addressed explicitly, so nothing depends on line wrapping and
/// the previous frame is simply overwritten.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some((cell.fg, cell.bg)) {
                apply_colors_into(out, cell)?;
                current = Some((cell.fg, cell.bg));
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_colors_into(out: &mut Vec<u8>, cell: Cell) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(cell.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(cell.bg)))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_encode_prints_every_cell_in_row_order() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.draw(0, 0, 'A', Rgb::WHITE, Rgb::BLACK);
        fb.draw(1, 0, 'B', Rgb::WHITE, Rgb::BLACK);
        fb.draw(0, 1, 'C', Rgb::WHITE, Rgb::BLACK);
        fb.draw(1, 1, 'D', Rgb::WHITE, Rgb::BLACK);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        let a = text.find('A').unwrap();
        let b = text.find('B').unwrap();
        let c = text.find('C').unwrap();
        let d = text.find('D').unwrap();
        assert!(a < b && b < c && c < d);
    }

    #[test]
    fn colors_are_only_emitted_on_change() {
        let mut fb = FrameBuffer::new(4, 1);
        let red = Rgb::new(255, 0, 0);
        fb.draw(2, 0, 'x', red, Rgb::BLACK);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        // white, red, then white again
        assert_eq!(text.matches("38;2;").count(), 3);
        assert!(text.contains("38;2;255;0;0"));
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
