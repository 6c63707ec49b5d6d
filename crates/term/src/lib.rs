//! Frame rendering and scheduling.
//!
//! Once per frame the [`FrameLoop`] steps the simulation driver and the
//! [`FrameRenderer`] copies the whole grid into a [`DrawSink`]. There is no
//! dirty tracking: every cell is redrawn every frame. Pacing is left to a
//! [`FrameScheduler`], so tests can single-step with [`ManualScheduler`] while
//! the terminal host uses [`IntervalScheduler`].
//!
//! Sinks:
//! - [`FrameBuffer`]: in-memory grid, used by tests and benches
//! - `TerminalRenderer`: crossterm output with raw mode and mouse capture
//!   (`crossterm` feature, on by default)

pub mod fb;
pub mod frame;
pub mod frame_loop;
#[cfg(feature = "crossterm")]
pub mod renderer;
pub mod schedule;
pub mod sink;

pub use glyph_loop_core as core;
pub use glyph_loop_types as types;

pub use fb::{Cell, FrameBuffer};
pub use frame::{FrameRenderer, RenderOutcome};
pub use frame_loop::{FrameError, FrameLoop, FrameReport};
pub use glyph_loop_input::CellMapper;
#[cfg(feature = "crossterm")]
pub use renderer::{encode_full_into, TerminalRenderer};
pub use schedule::{FrameScheduler, IntervalScheduler, ManualScheduler};
pub use sink::DrawSink;
