//! The per-frame control loop: step, render, reschedule.

use tracing::{error, trace};

use glyph_loop_core::{DriverError, Engine, InputQueue, SimulationDriver, StepReport};

use crate::frame::{FrameRenderer, RenderOutcome};
use crate::schedule::FrameScheduler;
use crate::sink::DrawSink;

/// A frame that did not complete.
#[derive(Debug, thiserror::Error)]
pub enum FrameError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Step(#[from] DriverError<E>),
    /// Presenting to the sink failed. The simulation itself is intact.
    #[error("drawing sink failed: {0:#}")]
    Sink(anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub step: StepReport,
    pub render: RenderOutcome,
}

/// Owns the driver and runs one frame per [`tick`](Self::tick).
#[derive(Debug)]
pub struct FrameLoop<E: Engine> {
    driver: SimulationDriver<E>,
    halted: bool,
}

impl<E: Engine> FrameLoop<E> {
    pub fn new(driver: SimulationDriver<E>) -> Self {
        Self {
            driver,
            halted: false,
        }
    }

    /// Run one frame.
    ///
    /// The driver steps first; the grid is then drawn into `sink` if it is
    /// present and attached, and the next frame is requested from
    /// `scheduler`. An engine failure halts the loop for good: it is
    /// reported once and no further frame is requested. A sink failure is
    /// reported without requesting another frame, leaving the host to decide.
    pub fn tick<S>(
        &mut self,
        sink: Option<&mut S>,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<FrameReport, FrameError<E::Error>>
    where
        S: DrawSink + ?Sized,
    {
        let step = match self.driver.step() {
            Ok(step) => step,
            Err(err) => {
                if !self.halted {
                    self.halted = true;
                    error!(error = %err, "frame loop halted");
                }
                return Err(err.into());
            }
        };

        let render = match sink {
            Some(sink) => FrameRenderer::render(&self.driver, sink).map_err(FrameError::Sink)?,
            None => {
                trace!(step = step.step, "no sink; frame skipped");
                RenderOutcome::Skipped
            }
        };

        scheduler.request_frame();
        Ok(FrameReport { step, render })
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn driver(&self) -> &SimulationDriver<E> {
        &self.driver
    }

    pub fn input_queue(&self) -> InputQueue {
        self.driver.input_queue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::FrameBuffer;
    use crate::schedule::ManualScheduler;
    use glyph_loop_types::{GridCell, GridSize, InputEvent, KeyModifiers, Rgb};

    #[derive(Debug, thiserror::Error)]
    #[error("out of fuel")]
    struct OutOfFuel;

    /// Shows the number of advances in cell (0, 0); fails once `fuel` runs out.
    struct Fuel {
        fuel: u32,
        advances: u32,
        inputs: u32,
    }

    impl Engine for Fuel {
        type Error = OutOfFuel;

        fn create(seed: u32) -> Self {
            Self {
                fuel: seed,
                advances: 0,
                inputs: 0,
            }
        }
        fn configure(&mut self, _size: GridSize) {}
        fn submit_input(&mut self, _event: InputEvent) {
            self.inputs += 1;
        }
        fn advance(&mut self) -> Result<(), OutOfFuel> {
            if self.fuel == 0 {
                return Err(OutOfFuel);
            }
            self.fuel -= 1;
            self.advances += 1;
            Ok(())
        }
        fn query_cell(&self, x: u16, y: u16) -> GridCell {
            if (x, y) == (0, 0) {
                let ch = char::from_digit(self.advances % 10, 10).unwrap_or('?');
                return GridCell::new(ch, Rgb::WHITE.packed(), 0);
            }
            GridCell::default()
        }
    }

    struct Detached;

    impl DrawSink for Detached {
        fn draw(&mut self, _x: u16, _y: u16, _glyph: char, _fg: Rgb, _bg: Rgb) {
            panic!("drawn while detached");
        }
        fn is_attached(&self) -> bool {
            false
        }
    }

    fn frame_loop(fuel: u32) -> FrameLoop<Fuel> {
        FrameLoop::new(SimulationDriver::launch(fuel, GridSize::new(4, 2)))
    }

    #[test]
    fn tick_steps_renders_and_requests_next_frame() {
        let mut frames = frame_loop(10);
        let mut fb = FrameBuffer::new(4, 2);
        let mut scheduler = ManualScheduler::new();

        let report = frames.tick(Some(&mut fb), &mut scheduler).unwrap();
        assert_eq!(report.step.step, 1);
        assert_eq!(report.render, RenderOutcome::Drawn { cells: 8 });
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('1'));
        assert_eq!(fb.presented(), 1);
        assert!(scheduler.take());

        frames.tick(Some(&mut fb), &mut scheduler).unwrap();
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('2'));
    }

    #[test]
    fn input_queued_between_frames_reaches_next_step() {
        let mut frames = frame_loop(10);
        let queue = frames.input_queue();
        let mut scheduler = ManualScheduler::new();

        for _ in 0..3 {
            queue.push(InputEvent::KeyDown {
                key_code: 37,
                modifiers: KeyModifiers::NONE,
            });
        }
        let report = frames
            .tick(None::<&mut FrameBuffer>, &mut scheduler)
            .unwrap();
        assert_eq!(report.step.events, 3);
        assert_eq!(frames.driver().engine().inputs, 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn detached_sink_still_steps_and_reschedules() {
        let mut frames = frame_loop(10);
        let mut scheduler = ManualScheduler::new();

        let report = frames.tick(Some(&mut Detached), &mut scheduler).unwrap();
        assert_eq!(report.render, RenderOutcome::Skipped);
        assert_eq!(frames.driver().steps(), 1);
        assert!(scheduler.take());
    }

    #[test]
    fn engine_failure_halts_without_rescheduling() {
        let mut frames = frame_loop(1);
        let mut fb = FrameBuffer::new(4, 2);
        let mut scheduler = ManualScheduler::new();

        frames.tick(Some(&mut fb), &mut scheduler).unwrap();
        assert!(scheduler.take());

        let err = frames.tick(Some(&mut fb), &mut scheduler).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Step(DriverError::Engine { step: 2, .. })
        ));
        assert!(frames.is_halted());
        assert!(!scheduler.is_pending());
        // Nothing new reached the sink.
        assert_eq!(fb.presented(), 1);

        let err = frames.tick(Some(&mut fb), &mut scheduler).unwrap_err();
        assert!(matches!(err, FrameError::Step(DriverError::Halted)));
        assert_eq!(frames.driver().engine().advances, 1);
        assert_eq!(scheduler.requests(), 1);
    }
}
