//! Simulation driver - the frame-synchronous bridge to an opaque engine
//!
//! This crate owns the contract between the host and the simulation. The
//! engine itself is a black box behind the [`Engine`] capability trait; the
//! driver only decides *when* the engine sees input and *when* it advances.
//!
//! # Frame Protocol
//!
//! 1. Input listeners append [`InputEvent`]s to the shared [`InputQueue`]
//!    at capture time, in platform dispatch order.
//! 2. Once per frame the host calls [`SimulationDriver::step`], which hands
//!    every queued event to the engine in arrival order, advances the engine
//!    exactly once and leaves the queue empty.
//! 3. The renderer then reads the grid through [`SimulationDriver::cell`].
//!    No input is applied between the step and the read, so the grid always
//!    reflects one completed step.
//!
//! Any number of events arriving between two frames are batched into a single
//! step.
//!
//! # Failure Model
//!
//! An engine error during `step` is fatal. The driver remembers the failure
//! and every later `step` returns [`DriverError::Halted`] without touching the
//! engine again. There are no retries.
//!
//! # Example
//!
//! ```
//! use glyph_loop_core::{Engine, SimulationDriver};
//! use glyph_loop_types::{GridCell, GridSize, InputEvent, KeyModifiers};
//!
//! #[derive(Default)]
//! struct Counter {
//!     seen: u32,
//! }
//!
//! impl Engine for Counter {
//!     type Error = std::convert::Infallible;
//!
//!     fn create(_seed: u32) -> Self {
//!         Self::default()
//!     }
//!     fn configure(&mut self, _size: GridSize) {}
//!     fn submit_input(&mut self, _event: InputEvent) {
//!         self.seen += 1;
//!     }
//!     fn advance(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!     fn query_cell(&self, _x: u16, _y: u16) -> GridCell {
//!         GridCell::new(char::from_digit(self.seen, 10).unwrap_or('?'), 0xffffff, 0)
//!     }
//! }
//!
//! let mut driver = SimulationDriver::<Counter>::launch(7, GridSize::new(1, 1));
//! let queue = driver.input_queue();
//! queue.push(InputEvent::KeyDown { key_code: 37, modifiers: KeyModifiers::NONE });
//! queue.push(InputEvent::KeyDown { key_code: 39, modifiers: KeyModifiers::NONE });
//!
//! let report = driver.step().unwrap();
//! assert_eq!(report.events, 2);
//! assert!(queue.is_empty());
//! assert_eq!(driver.cell(0, 0).glyph_char(), '2');
//! ```

pub mod driver;
pub mod engine;
pub mod queue;

pub use glyph_loop_types as types;

pub use driver::{DriverError, SimulationDriver, StepReport};
pub use engine::Engine;
pub use queue::InputQueue;

pub use glyph_loop_types::{GridCell, GridSize, InputEvent};
