//! The engine capability.

use glyph_loop_types::{GridCell, GridSize, InputEvent};

/// Opaque turn-based simulation driven one step per frame.
///
/// The driver never inspects engine state; it only feeds input, advances and
/// queries cells. Production engines and test doubles are interchangeable at
/// driver construction time.
pub trait Engine {
    /// Error raised by [`Engine::advance`]. Any such error halts the session.
    type Error: std::error::Error + 'static;

    /// Build a fresh engine from a session seed.
    fn create(seed: u32) -> Self
    where
        Self: Sized;

    /// Fix the grid size. Called once, before the first step.
    fn configure(&mut self, size: GridSize);

    /// Queue one input event for the next [`Engine::advance`].
    fn submit_input(&mut self, event: InputEvent);

    /// Perform one simulation step, consuming all submitted input.
    fn advance(&mut self) -> Result<(), Self::Error>;

    /// Cell contents after the most recent step.
    ///
    /// Out-of-bounds coordinates are a caller bug; what the engine returns for
    /// them is engine-defined.
    fn query_cell(&self, x: u16, y: u16) -> GridCell;
}
