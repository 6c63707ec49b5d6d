//! Full-grid copy from the driver into a sink.

use anyhow::Result;
use tracing::trace;

use glyph_loop_core::{Engine, SimulationDriver};

use crate::sink::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every cell was drawn and the sink presented.
    Drawn { cells: usize },
    /// The sink was not attached; nothing was drawn.
    Skipped,
}

/// Copies every grid cell into a [`DrawSink`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameRenderer;

impl FrameRenderer {
    /// Draw the whole grid, column by column, then present.
    ///
    /// Packed colors are unpacked to [`Rgb`](glyph_loop_types::Rgb) and
    /// invalid glyph codes render as U+FFFD. Rendering the same grid twice
    /// yields the same sequence of draw calls.
    pub fn render<E, S>(driver: &SimulationDriver<E>, sink: &mut S) -> Result<RenderOutcome>
    where
        E: Engine,
        S: DrawSink + ?Sized,
    {
        if !sink.is_attached() {
            trace!("sink detached; frame skipped");
            return Ok(RenderOutcome::Skipped);
        }

        let size = driver.size();
        for x in 0..size.width {
            for y in 0..size.height {
                let cell = driver.cell(x, y);
                sink.draw(x, y, cell.glyph_char(), cell.fg_rgb(), cell.bg_rgb());
            }
        }
        sink.present()?;
        Ok(RenderOutcome::Drawn { cells: size.area() })
    }
}
