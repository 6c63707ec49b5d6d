//! Driver contract tests against a recording engine and the dungeon.

use std::cell::RefCell;
use std::rc::Rc;

use glyph_loop::core::{DriverError, Engine, SimulationDriver};
use glyph_loop::engine::Dungeon;
use glyph_loop::types::{key_codes, GridCell, GridSize, InputEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(u32),
    Configure(GridSize),
    Submit(InputEvent),
    Advance,
}

thread_local! {
    static CALLS: RefCell<Rc<RefCell<Vec<Call>>>> = RefCell::new(Rc::new(RefCell::new(Vec::new())));
}

fn fresh_log() -> Rc<RefCell<Vec<Call>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    CALLS.with(|c| *c.borrow_mut() = log.clone());
    log
}

#[derive(Debug, thiserror::Error)]
#[error("refusing to advance")]
struct Refused;

/// Logs every call into the thread-local log captured at creation time.
struct Recorder {
    log: Rc<RefCell<Vec<Call>>>,
    fail_on: Option<usize>,
    advances: usize,
}

impl Engine for Recorder {
    type Error = Refused;

    fn create(seed: u32) -> Self {
        let log = CALLS.with(|c| c.borrow().clone());
        log.borrow_mut().push(Call::Create(seed));
        Self {
            log,
            fail_on: None,
            advances: 0,
        }
    }

    fn configure(&mut self, size: GridSize) {
        self.log.borrow_mut().push(Call::Configure(size));
    }

    fn submit_input(&mut self, event: InputEvent) {
        self.log.borrow_mut().push(Call::Submit(event));
    }

    fn advance(&mut self) -> Result<(), Refused> {
        self.log.borrow_mut().push(Call::Advance);
        self.advances += 1;
        if self.fail_on == Some(self.advances) {
            return Err(Refused);
        }
        Ok(())
    }

    fn query_cell(&self, _x: u16, _y: u16) -> GridCell {
        GridCell::default()
    }
}

fn left_arrow() -> InputEvent {
    InputEvent::KeyDown {
        key_code: key_codes::LEFT,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_launch_creates_then_configures() {
    let log = fresh_log();
    let _driver = SimulationDriver::<Recorder>::launch(42, GridSize::new(80, 36));
    assert_eq!(
        *log.borrow(),
        vec![Call::Create(42), Call::Configure(GridSize::new(80, 36))]
    );
}

#[test]
fn test_key_down_37_is_submitted_before_advance() {
    let log = fresh_log();
    let mut driver = SimulationDriver::<Recorder>::launch(1, GridSize::new(80, 36));
    driver.input_queue().push(left_arrow());
    driver.step().unwrap();

    assert_eq!(
        log.borrow()[2..],
        [Call::Submit(left_arrow()), Call::Advance]
    );
}

#[test]
fn test_events_between_frames_arrive_in_order_exactly_once() {
    let log = fresh_log();
    let mut driver = SimulationDriver::<Recorder>::launch(1, GridSize::new(10, 10));
    let queue = driver.input_queue();

    let batch = [
        left_arrow(),
        InputEvent::KeyPress {
            char_code: 'w' as u32,
            ctrl: false,
            alt: false,
        },
        InputEvent::MousePress {
            x: 2,
            y: 3,
            button: 0,
        },
        InputEvent::MouseWheel {
            x: 2,
            y: 3,
            notches: -1,
        },
    ];
    for event in batch {
        queue.push(event);
    }
    let report = driver.step().unwrap();
    assert_eq!(report.events, 4);

    // A second frame without input advances without resubmitting anything.
    driver.step().unwrap();

    let mut expected: Vec<Call> = batch.into_iter().map(Call::Submit).collect();
    expected.push(Call::Advance);
    expected.push(Call::Advance);
    assert_eq!(log.borrow()[2..], expected[..]);
}

#[test]
fn test_engine_failure_is_fatal() {
    fresh_log();
    let mut engine = Recorder::create(5);
    engine.fail_on = Some(1);
    let mut driver = SimulationDriver::new(engine, GridSize::new(4, 4));
    driver.input_queue().push(left_arrow());

    let err = driver.step().unwrap_err();
    assert!(matches!(err, DriverError::Engine { step: 1, .. }));
    assert!(driver.is_failed());

    assert!(matches!(driver.step(), Err(DriverError::Halted)));
    assert_eq!(driver.engine().advances, 1);
}

#[test]
fn test_corner_cells_are_queryable_after_step() {
    for size in [GridSize::new(80, 36), GridSize::new(1, 1), GridSize::new(20, 5)] {
        let mut driver = SimulationDriver::<Dungeon>::launch(42, size);
        driver.step().unwrap();
        let _ = driver.cell(0, 0);
        let _ = driver.cell(size.width - 1, size.height - 1);
    }
}

#[test]
fn test_dungeon_rejects_empty_grid() {
    let mut driver = SimulationDriver::<Dungeon>::launch(42, GridSize::new(0, 0));
    assert!(matches!(driver.step(), Err(DriverError::Engine { .. })));
    assert!(matches!(driver.step(), Err(DriverError::Halted)));
}
