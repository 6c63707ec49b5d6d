//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types passed between the input
//! normalizer, the simulation driver and the frame renderer. All types are
//! plain data with no external dependencies, making them usable in any host
//! (terminal, browser, headless tests).
//!
//! # Grid Dimensions
//!
//! The character grid is fixed for the lifetime of a session:
//!
//! - **Width**: 80 columns by default (indexed 0-79)
//! - **Height**: 36 rows by default (indexed 0-35)
//!
//! # Frame Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Native frame interval (~60 FPS, one vsync tick) |
//! | `INITIAL_MIN_WHEEL_DELTA` | 1e9 | Starting value of the wheel running minimum |
//!
//! # Packed Colors
//!
//! Grid colors travel as 24-bit packed integers with red in the low byte:
//!
//! | Bits | Channel |
//! |------|---------|
//! | 0-7 | red |
//! | 8-15 | green |
//! | 16-23 | blue |
//!
//! # Examples
//!
//! ```
//! use glyph_loop_types::{GridCell, GridSize, InputEvent, KeyModifiers, Rgb, key_codes};
//!
//! let size = GridSize::default();
//! assert_eq!((size.width, size.height), (80, 36));
//!
//! let event = InputEvent::KeyDown {
//!     key_code: key_codes::LEFT,
//!     modifiers: KeyModifiers::NONE,
//! };
//! assert_eq!(event.kind(), "keydown");
//!
//! let orange = Rgb::new(0xff, 0x80, 0x00);
//! assert_eq!(orange.packed(), 0x0080ff);
//! assert_eq!(Rgb::from_packed(0x0080ff), orange);
//!
//! let cell = GridCell::new('@', orange.packed(), 0);
//! assert_eq!(cell.glyph_char(), '@');
//! ```

/// Default grid width in cells (80 columns)
pub const DEFAULT_WIDTH: u16 = 80;

/// Default grid height in cells (36 rows)
pub const DEFAULT_HEIGHT: u16 = 36;

/// Native frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Starting value of the wheel-delta running minimum.
///
/// Any real wheel delta is smaller, so the first event of a session always
/// normalizes to a single notch.
pub const INITIAL_MIN_WHEEL_DELTA: f64 = 1e9;

/// Glyph used when a cell carries a code that is not a Unicode scalar value.
pub const REPLACEMENT_GLYPH: char = '\u{FFFD}';

/// DOM `keyCode` values for the named keys the engine understands.
///
/// Printable keys are not listed: their text arrives on the key-press
/// channel as a character code.
pub mod key_codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const NUMPAD_CENTER: u32 = 12;
    pub const ENTER: u32 = 13;
    pub const PAUSE_BREAK: u32 = 19;
    pub const ESCAPE: u32 = 27;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const INSERT: u32 = 45;
    pub const DELETE: u32 = 46;
    /// F1; F2..F12 follow consecutively.
    pub const F1: u32 = 112;
    pub const F12: u32 = 123;
}

/// DOM `MouseEvent.button` identifiers.
pub mod mouse_buttons {
    pub const LEFT: u32 = 0;
    pub const MIDDLE: u32 = 1;
    pub const RIGHT: u32 = 2;
    pub const BACK: u32 = 3;
    pub const FORWARD: u32 = 4;
}

/// Fixed grid size for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of cells in the grid.
    pub const fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Modifier keys held while a key event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const fn new(ctrl: bool, alt: bool, shift: bool) -> Self {
        Self { ctrl, alt, shift }
    }

    pub const fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

/// Canonical input record handed to the simulation engine.
///
/// Created by the input normalizer when a platform event is captured and
/// consumed exactly once by the next simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A physical key went down. `key_code` is the DOM `keyCode`.
    KeyDown {
        key_code: u32,
        modifiers: KeyModifiers,
    },
    /// Printable text input. `char_code` is a Unicode code point.
    KeyPress { char_code: u32, ctrl: bool, alt: bool },
    /// Mouse button pressed over grid cell (x, y).
    MousePress { x: u16, y: u16, button: u32 },
    /// Mouse button released over grid cell (x, y).
    MouseRelease { x: u16, y: u16, button: u32 },
    /// Wheel scrolled over grid cell (x, y). Positive notches scroll down.
    MouseWheel { x: u16, y: u16, notches: i32 },
}

impl InputEvent {
    /// Short lowercase name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::KeyDown { .. } => "keydown",
            InputEvent::KeyPress { .. } => "keypress",
            InputEvent::MousePress { .. } => "mousedown",
            InputEvent::MouseRelease { .. } => "mouseup",
            InputEvent::MouseWheel { .. } => "wheel",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `r | g << 8 | b << 16` integer. Bits above 23 are ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: ((packed >> 16) & 0xff) as u8,
        }
    }

    pub const fn packed(&self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }

    /// CSS hex notation (`#rrggbb`).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One cell of engine output: a glyph and two packed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Unicode code point of the glyph.
    pub glyph: u32,
    pub fg: u32,
    pub bg: u32,
}

impl GridCell {
    pub const fn new(glyph: char, fg: u32, bg: u32) -> Self {
        Self {
            glyph: glyph as u32,
            fg,
            bg,
        }
    }

    /// Glyph as a `char`, substituting [`REPLACEMENT_GLYPH`] for invalid codes.
    pub fn glyph_char(&self) -> char {
        char::from_u32(self.glyph).unwrap_or(REPLACEMENT_GLYPH)
    }

    pub const fn fg_rgb(&self) -> Rgb {
        Rgb::from_packed(self.fg)
    }

    pub const fn bg_rgb(&self) -> Rgb {
        Rgb::from_packed(self.bg)
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::new(' ', Rgb::WHITE.packed(), Rgb::BLACK.packed())
    }
}
