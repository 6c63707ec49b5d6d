//! Input normalizer (platform-facing).
//!
//! Converts raw platform input (key-down, key-press, mouse-down, mouse-up,
//! wheel) into canonical [`glyph_loop_types::InputEvent`]s appended to the
//! simulation driver's [`glyph_loop_core::InputQueue`], and tells the host
//! which events should have their default platform handling suppressed.
//!
//! The normalizer knows nothing about browsers or terminals. Hosts build the
//! `Raw*` records from their own event types; `map` does that for
//! `crossterm`.

#[cfg(feature = "crossterm")]
pub mod map;
pub mod normalizer;
pub mod wheel;

pub use glyph_loop_types as types;

#[cfg(feature = "crossterm")]
pub use map::{key_event_to_raw, mouse_event_to_raw, should_quit, RawKeyInput, RawMouseInput};
pub use normalizer::{
    CellMapper, DefaultAction, InputNormalizer, RawKeyDown, RawKeyPress, RawPointer, RawWheel,
};
pub use wheel::WheelNormalizer;
