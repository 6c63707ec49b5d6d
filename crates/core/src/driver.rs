//! SimulationDriver: owns the engine and the pending-input queue.

use tracing::{debug, error, info, trace};

use crate::engine::Engine;
use crate::queue::InputQueue;
use glyph_loop_types::{GridCell, GridSize};

/// Failure of a simulation step.
#[derive(Debug, thiserror::Error)]
pub enum DriverError<E>
where
    E: std::error::Error + 'static,
{
    /// The engine raised an error while advancing. The session is over.
    #[error("engine failed during step {step}")]
    Engine {
        step: u64,
        #[source]
        source: E,
    },
    /// A previous step failed; the engine is not touched again.
    #[error("simulation halted by an earlier engine failure")]
    Halted,
}

/// Result of one successful [`SimulationDriver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based index of the step that just completed.
    pub step: u64,
    /// Number of input events delivered to the engine in this step.
    pub events: usize,
}

/// Frame-synchronous driver around an opaque [`Engine`].
#[derive(Debug)]
pub struct SimulationDriver<E: Engine> {
    engine: E,
    size: GridSize,
    seed: Option<u32>,
    queue: InputQueue,
    steps: u64,
    failed: bool,
}

impl<E: Engine> SimulationDriver<E> {
    /// Wrap an already-created engine and fix its grid size.
    pub fn new(mut engine: E, size: GridSize) -> Self {
        engine.configure(size);
        Self {
            engine,
            size,
            seed: None,
            queue: InputQueue::new(),
            steps: 0,
            failed: false,
        }
    }

    /// Create the engine from `seed` and configure it.
    ///
    /// The seed is logged so a session can be reproduced.
    pub fn launch(seed: u32, size: GridSize) -> Self {
        info!(seed, width = size.width, height = size.height, "launching simulation");
        let mut driver = Self::new(E::create(seed), size);
        driver.seed = Some(seed);
        driver
    }

    /// Handle for input listeners. Every clone feeds this driver.
    pub fn input_queue(&self) -> InputQueue {
        self.queue.clone()
    }

    /// Deliver all pending input in arrival order, then advance once.
    ///
    /// Called at most once per frame. Events captured after this call returns
    /// belong to the next step.
    pub fn step(&mut self) -> Result<StepReport, DriverError<E::Error>> {
        if self.failed {
            return Err(DriverError::Halted);
        }

        let batch = self.queue.drain();
        let events = batch.len();
        for event in batch {
            trace!(kind = event.kind(), "submitting input");
            self.engine.submit_input(event);
        }

        let step = self.steps + 1;
        if let Err(source) = self.engine.advance() {
            self.failed = true;
            error!(step, error = %source, "engine failed; simulation halted");
            return Err(DriverError::Engine { step, source });
        }
        self.steps = step;

        if events > 0 {
            debug!(step, events, "step consumed input");
        }
        Ok(StepReport { step, events })
    }

    /// Current contents of grid cell (x, y). No bounds clamping is applied.
    pub fn cell(&self, x: u16, y: u16) -> GridCell {
        self.engine.query_cell(x, y)
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Seed the engine was launched with, if it was created by the driver.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_loop_types::{InputEvent, KeyModifiers};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Configure(GridSize),
        Submit(InputEvent),
        Advance,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("scripted failure")]
    struct Scripted;

    /// Records every call; `cell` reports how many events the last completed
    /// advance applied.
    #[derive(Debug, Default)]
    struct Recorder {
        seed: u32,
        calls: Vec<Call>,
        staged: u32,
        applied: u32,
        fail_on_advance: Option<usize>,
        advances: usize,
    }

    impl Engine for Recorder {
        type Error = Scripted;

        fn create(seed: u32) -> Self {
            Self {
                seed,
                ..Self::default()
            }
        }

        fn configure(&mut self, size: GridSize) {
            self.calls.push(Call::Configure(size));
        }

        fn submit_input(&mut self, event: InputEvent) {
            self.staged += 1;
            self.calls.push(Call::Submit(event));
        }

        fn advance(&mut self) -> Result<(), Scripted> {
            self.calls.push(Call::Advance);
            self.advances += 1;
            if self.fail_on_advance == Some(self.advances) {
                return Err(Scripted);
            }
            self.applied = self.staged;
            self.staged = 0;
            Ok(())
        }

        fn query_cell(&self, _x: u16, _y: u16) -> GridCell {
            GridCell {
                glyph: self.applied,
                fg: 0,
                bg: 0,
            }
        }
    }

    fn key(code: u32) -> InputEvent {
        InputEvent::KeyDown {
            key_code: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn launch_creates_with_seed_then_configures() {
        let driver = SimulationDriver::<Recorder>::launch(42, GridSize::new(80, 36));
        assert_eq!(driver.engine().seed, 42);
        assert_eq!(driver.seed(), Some(42));
        assert_eq!(
            driver.engine().calls,
            vec![Call::Configure(GridSize::new(80, 36))]
        );
    }

    #[test]
    fn left_arrow_is_submitted_before_advance() {
        let mut driver = SimulationDriver::new(Recorder::default(), GridSize::new(4, 4));
        driver.input_queue().push(key(37));

        let report = driver.step().unwrap();
        assert_eq!(report, StepReport { step: 1, events: 1 });
        assert_eq!(
            driver.engine().calls[1..],
            [Call::Submit(key(37)), Call::Advance]
        );
    }

    #[test]
    fn batch_is_delivered_in_order_exactly_once_with_one_advance() {
        let mut driver = SimulationDriver::new(Recorder::default(), GridSize::new(4, 4));
        let queue = driver.input_queue();
        let events = [
            key(38),
            InputEvent::KeyPress {
                char_code: 'w' as u32,
                ctrl: false,
                alt: false,
            },
            InputEvent::MousePress {
                x: 1,
                y: 2,
                button: 0,
            },
            InputEvent::MouseWheel {
                x: 0,
                y: 0,
                notches: -1,
            },
        ];
        for event in events {
            queue.push(event);
        }

        driver.step().unwrap();
        driver.step().unwrap();

        let mut expected = vec![Call::Configure(GridSize::new(4, 4))];
        expected.extend(events.iter().copied().map(Call::Submit));
        expected.push(Call::Advance);
        expected.push(Call::Advance);
        assert_eq!(driver.engine().calls, expected);
        assert!(queue.is_empty());
        assert_eq!(driver.steps(), 2);
    }

    #[test]
    fn grid_reflects_whole_batch_after_step() {
        let mut driver = SimulationDriver::new(Recorder::default(), GridSize::new(2, 2));
        let queue = driver.input_queue();
        queue.push(key(1));
        queue.push(key(2));
        queue.push(key(3));

        driver.step().unwrap();
        assert_eq!(driver.cell(0, 0).glyph, 3);

        queue.push(key(4));
        // Not stepped yet: the grid still shows the previous step.
        assert_eq!(driver.cell(1, 1).glyph, 3);
        driver.step().unwrap();
        assert_eq!(driver.cell(1, 1).glyph, 1);
    }

    #[test]
    fn engine_failure_is_fatal_and_never_retried() {
        let engine = Recorder {
            fail_on_advance: Some(2),
            ..Recorder::default()
        };
        let mut driver = SimulationDriver::new(engine, GridSize::new(1, 1));

        assert!(driver.step().is_ok());
        match driver.step() {
            Err(DriverError::Engine { step, .. }) => assert_eq!(step, 2),
            other => panic!("expected engine failure, got {other:?}"),
        }
        assert!(driver.is_failed());

        driver.input_queue().push(key(1));
        assert!(matches!(driver.step(), Err(DriverError::Halted)));
        assert_eq!(driver.engine().advances, 2);
        assert_eq!(driver.input_queue().len(), 1);
        assert_eq!(driver.steps(), 1);
    }
}
