//! The drawing surface a frame is rendered into.

use anyhow::Result;

use glyph_loop_types::Rgb;

/// Anything that can display a grid of colored glyphs.
pub trait DrawSink {
    /// Set cell (x, y). Calls outside the surface are ignored.
    fn draw(&mut self, x: u16, y: u16, glyph: char, fg: Rgb, bg: Rgb);

    /// Whether the surface exists yet. A detached sink is skipped for the
    /// frame but the loop keeps running.
    fn is_attached(&self) -> bool {
        true
    }

    /// Called once after every cell of a frame has been drawn.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: DrawSink + ?Sized> DrawSink for &mut S {
    fn draw(&mut self, x: u16, y: u16, glyph: char, fg: Rgb, bg: Rgb) {
        (**self).draw(x, y, glyph, fg, bg)
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
