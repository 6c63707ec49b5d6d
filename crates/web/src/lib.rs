#![forbid(unsafe_code)]

//! Browser host.
//!
//! `start(display, width, height)` wires a JavaScript character display (a
//! `ROT.Display`-like object exposing `draw`, `eventToPosition` and
//! `getContainer`) to the dungeon engine: DOM listeners feed the input
//! normalizer and a `requestAnimationFrame` loop runs one frame per refresh.
//!
//! Only the cell-position helpers compile natively; everything touching the
//! DOM is `wasm32`-only.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::start;

use glyph_loop_types::GridSize;

/// Grid cell for a display position pair.
///
/// The display reports `[-1, -1]` (or any negative pair) for points outside
/// the grid; non-finite coordinates are treated the same way.
pub fn position_to_cell(x: f64, y: f64, size: GridSize) -> Option<(u16, u16)> {
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    let (x, y) = (x.floor(), y.floor());
    if x > u16::MAX as f64 || y > u16::MAX as f64 {
        return None;
    }
    let (x, y) = (x as u16, y as u16);
    size.contains(x, y).then_some((x, y))
}

/// Session seed from a `Math.random()` sample in `[0, 1)`.
pub fn seed_from_random(sample: f64) -> u32 {
    (sample * 4_294_967_296.0).floor() as u32
}
