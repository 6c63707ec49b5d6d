//! InputNormalizer: raw platform events in, canonical events out.

use tracing::trace;

use glyph_loop_core::InputQueue;
use glyph_loop_types::{InputEvent, KeyModifiers};

use crate::wheel::WheelNormalizer;

/// Whether the host should let the platform's default handling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Propagate,
    /// Call `preventDefault` (or the host's equivalent).
    Suppress,
}

impl DefaultAction {
    pub fn is_suppressed(self) -> bool {
        self == DefaultAction::Suppress
    }
}

/// Pixel-to-cell mapping provided by the drawing surface.
pub trait CellMapper {
    /// Grid cell under pixel (`px`, `py`), `None` when outside the grid.
    fn map_pixel_to_cell(&self, px: i32, py: i32) -> Option<(u16, u16)>;
}

impl<F> CellMapper for F
where
    F: Fn(i32, i32) -> Option<(u16, u16)>,
{
    fn map_pixel_to_cell(&self, px: i32, py: i32) -> Option<(u16, u16)> {
        self(px, py)
    }
}

/// A key went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyDown {
    pub key_code: u32,
    /// Textual key name (`"a"`, `"ArrowLeft"`, `"F5"`).
    pub key: String,
    pub modifiers: KeyModifiers,
}

/// Printable text was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyPress {
    pub char_code: u32,
    pub ctrl: bool,
    pub alt: bool,
}

/// Mouse button down or up at a pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPointer {
    pub pixel_x: i32,
    pub pixel_y: i32,
    pub button: u32,
}

/// Wheel motion at a pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawWheel {
    pub pixel_x: i32,
    pub pixel_y: i32,
    pub delta_y: f64,
}

/// Session-scoped input normalizer.
///
/// Until [`attach`](Self::attach) is called every event is discarded (the
/// engine is not ready yet) and nothing is suppressed. Once attached, each
/// raw event that maps onto the grid becomes exactly one queued
/// [`InputEvent`].
#[derive(Debug, Default)]
pub struct InputNormalizer {
    queue: Option<InputQueue>,
    wheel: WheelNormalizer,
    dropped: u64,
}

impl InputNormalizer {
    /// A detached normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start feeding `queue`.
    pub fn attach(&mut self, queue: InputQueue) {
        self.queue = Some(queue);
    }

    pub fn detach(&mut self) {
        self.queue = None;
    }

    pub fn is_attached(&self) -> bool {
        self.queue.is_some()
    }

    /// Events discarded because no queue was attached.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn wheel_normalizer(&self) -> &WheelNormalizer {
        &self.wheel
    }

    fn queue_or_drop(&mut self, kind: &'static str) -> Option<&InputQueue> {
        if self.queue.is_none() {
            self.dropped += 1;
            trace!(kind, "input dropped before engine attached");
        }
        self.queue.as_ref()
    }

    /// Named keys are suppressed; single-character keys propagate so text
    /// entry keeps working and arrives again on the key-press channel.
    ///
    /// Key text length is counted in UTF-16 code units, as the DOM reports
    /// it, so a lone astral-plane character counts as two and is suppressed.
    pub fn key_down(&mut self, raw: &RawKeyDown) -> DefaultAction {
        let Some(queue) = self.queue_or_drop("keydown") else {
            return DefaultAction::Propagate;
        };
        queue.push(InputEvent::KeyDown {
            key_code: raw.key_code,
            modifiers: raw.modifiers,
        });
        if raw.key.encode_utf16().count() == 1 {
            DefaultAction::Propagate
        } else {
            DefaultAction::Suppress
        }
    }

    pub fn key_press(&mut self, raw: &RawKeyPress) -> DefaultAction {
        let Some(queue) = self.queue_or_drop("keypress") else {
            return DefaultAction::Propagate;
        };
        queue.push(InputEvent::KeyPress {
            char_code: raw.char_code,
            ctrl: raw.ctrl,
            alt: raw.alt,
        });
        DefaultAction::Suppress
    }

    pub fn mouse_down(&mut self, raw: &RawPointer, mapper: &impl CellMapper) -> DefaultAction {
        self.pointer(raw, mapper, true)
    }

    pub fn mouse_up(&mut self, raw: &RawPointer, mapper: &impl CellMapper) -> DefaultAction {
        self.pointer(raw, mapper, false)
    }

    fn pointer(&mut self, raw: &RawPointer, mapper: &impl CellMapper, press: bool) -> DefaultAction {
        let kind = if press { "mousedown" } else { "mouseup" };
        let Some(queue) = self.queue_or_drop(kind) else {
            return DefaultAction::Propagate;
        };
        let Some((x, y)) = mapper.map_pixel_to_cell(raw.pixel_x, raw.pixel_y) else {
            trace!(kind, raw.pixel_x, raw.pixel_y, "pointer outside grid");
            return DefaultAction::Propagate;
        };
        let button = raw.button;
        queue.push(if press {
            InputEvent::MousePress { x, y, button }
        } else {
            InputEvent::MouseRelease { x, y, button }
        });
        DefaultAction::Propagate
    }

    /// The running minimum is updated even while detached.
    pub fn wheel(&mut self, raw: &RawWheel, mapper: &impl CellMapper) -> DefaultAction {
        let notches = self.wheel.observe(raw.delta_y);
        let Some(queue) = self.queue_or_drop("wheel") else {
            return DefaultAction::Propagate;
        };
        if let Some((x, y)) = mapper.map_pixel_to_cell(raw.pixel_x, raw.pixel_y) {
            queue.push(InputEvent::MouseWheel { x, y, notches });
        }
        DefaultAction::Suppress
    }
}
