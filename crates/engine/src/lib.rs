//! Dungeon engine - the production simulation behind the driver
//!
//! [`Dungeon`] implements [`glyph_loop_core::Engine`]. It is made of two
//! layers:
//!
//! - a **virtual terminal** ([`terminal`]) that turns canonical input records
//!   into terminal-style events ([`events`]) and holds the glyph buffer the
//!   host renders;
//! - a small **turn-based dungeon** ([`world`]) drawn into that buffer
//!   ([`view`]) after every step.
//!
//! Everything is a pure function of the session seed and the input sequence:
//! two dungeons created from the same seed and fed the same events produce the
//! same grid, cell for cell.
//!
//! # Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Arrow keys | Move one tile |
//! | `.` / `r` | Rest |
//! | `w` | Wait |
//! | Left click next to `@` | Step onto that tile |
//! | Wheel | Scroll the message log |
//!
//! # Example
//!
//! ```
//! use glyph_loop_core::SimulationDriver;
//! use glyph_loop_engine::Dungeon;
//! use glyph_loop_types::GridSize;
//!
//! let mut driver = SimulationDriver::<Dungeon>::launch(42, GridSize::new(80, 36));
//! driver.step().unwrap();
//! assert_eq!(driver.cell(3, 4).glyph_char(), '@');
//! ```

pub mod events;
pub mod rng;
pub mod terminal;
pub mod view;
pub mod world;

use std::collections::VecDeque;

use tracing::debug;

use glyph_loop_core::Engine;
use glyph_loop_types::{GridCell, GridSize, InputEvent};

pub use events::{Key, MouseAction, MouseButton, TermEvent};
pub use terminal::VirtualTerminal;
pub use world::{Action, Direction, World};

/// Errors raised by [`Dungeon::advance`](Engine::advance).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DungeonError {
    #[error("advance called before the grid size was configured")]
    NotConfigured,
    #[error("grid {width}x{height} has no cells to draw")]
    EmptyGrid { width: u16, height: u16 },
}

/// The dungeon engine.
#[derive(Debug, Clone)]
pub struct Dungeon {
    seed: u32,
    world: World,
    terminal: VirtualTerminal,
    size: Option<GridSize>,
    pending: VecDeque<TermEvent>,
    log_scroll: usize,
}

impl Dungeon {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            world: World::generate(seed),
            terminal: VirtualTerminal::new(),
            size: None,
            pending: VecDeque::new(),
            log_scroll: 0,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn handle(&mut self, event: TermEvent) {
        let action = match event {
            TermEvent::Resize(size) => {
                self.terminal.resize(size);
                None
            }
            TermEvent::Key(key, modifiers) if !modifiers.ctrl && !modifiers.alt => match key {
                Key::Up => Some(Action::Move(Direction::Up)),
                Key::Down => Some(Action::Move(Direction::Down)),
                Key::Left => Some(Action::Move(Direction::Left)),
                Key::Right => Some(Action::Move(Direction::Right)),
                _ => None,
            },
            TermEvent::Char('.') | TermEvent::Char('r') => Some(Action::Rest),
            TermEvent::Char('w') => Some(Action::Wait),
            TermEvent::Mouse {
                x,
                y,
                action: MouseAction::Press(MouseButton::Left),
            } => view::screen_to_map(x, y)
                .and_then(|target| Direction::between(self.world.player, target))
                .map(Action::Move),
            TermEvent::Mouse {
                action: MouseAction::WheelUp,
                ..
            } => {
                let max = view::max_log_scroll(self.world.log().len());
                self.log_scroll = (self.log_scroll + 1).min(max);
                None
            }
            TermEvent::Mouse {
                action: MouseAction::WheelDown,
                ..
            } => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            if self.world.act(action) {
                // New messages snap the log back to the bottom.
                self.log_scroll = 0;
                debug!(turn = self.world.turn, ?action, "turn taken");
            }
        }
    }
}

impl Engine for Dungeon {
    type Error = DungeonError;

    fn create(seed: u32) -> Self {
        Self::new(seed)
    }

    fn configure(&mut self, size: GridSize) {
        self.size = Some(size);
        self.pending.push_back(TermEvent::Resize(size));
    }

    fn submit_input(&mut self, event: InputEvent) {
        let size = self.size.unwrap_or(GridSize::new(0, 0));
        events::translate(event, size, &mut self.pending);
    }

    fn advance(&mut self) -> Result<(), DungeonError> {
        let size = self.size.ok_or(DungeonError::NotConfigured)?;
        if size.area() == 0 {
            return Err(DungeonError::EmptyGrid {
                width: size.width,
                height: size.height,
            });
        }

        while let Some(event) = self.pending.pop_front() {
            self.handle(event);
        }
        view::draw(&mut self.terminal, &self.world, self.seed, self.log_scroll);
        Ok(())
    }

    fn query_cell(&self, x: u16, y: u16) -> GridCell {
        self.terminal.cell(x, y)
    }
}

impl Default for Dungeon {
    fn default() -> Self {
        Self::new(1)
    }
}
