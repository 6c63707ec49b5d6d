//! Translation from canonical input records to terminal-style events.

use std::collections::VecDeque;

use glyph_loop_types::{key_codes, mouse_buttons, GridSize, InputEvent, KeyModifiers};

use crate::view::max_log_scroll;
use crate::world::MAX_LOG_LINES;

/// Named keys the dungeon can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Ins,
    Del,
    Home,
    End,
    PageUp,
    PageDown,
    PauseBreak,
    NumpadCenter,
    /// Function key F1..=F12.
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Press(MouseButton),
    Release(MouseButton),
    WheelUp,
    WheelDown,
}

/// Event as the dungeon sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermEvent {
    Key(Key, KeyModifiers),
    Char(char),
    CtrlChar(char),
    AltChar(char),
    Mouse { x: u16, y: u16, action: MouseAction },
    Resize(GridSize),
}

/// Map a DOM key code to a named key.
pub fn key_from_code(key_code: u32) -> Option<Key> {
    Some(match key_code {
        key_codes::ENTER => Key::Enter,
        key_codes::TAB => Key::Tab,
        key_codes::BACKSPACE => Key::Backspace,
        key_codes::ESCAPE => Key::Esc,
        key_codes::LEFT => Key::Left,
        key_codes::RIGHT => Key::Right,
        key_codes::UP => Key::Up,
        key_codes::DOWN => Key::Down,
        key_codes::INSERT => Key::Ins,
        key_codes::DELETE => Key::Del,
        key_codes::HOME => Key::Home,
        key_codes::END => Key::End,
        key_codes::PAGE_UP => Key::PageUp,
        key_codes::PAGE_DOWN => Key::PageDown,
        key_codes::PAUSE_BREAK => Key::PauseBreak,
        key_codes::NUMPAD_CENTER => Key::NumpadCenter,
        code @ key_codes::F1..=key_codes::F12 => Key::F((code - key_codes::F1 + 1) as u8),
        _ => return None,
    })
}

pub fn button_from_id(button: u32) -> Option<MouseButton> {
    Some(match button {
        mouse_buttons::LEFT => MouseButton::Left,
        mouse_buttons::MIDDLE => MouseButton::Middle,
        mouse_buttons::RIGHT => MouseButton::Right,
        mouse_buttons::BACK => MouseButton::Back,
        mouse_buttons::FORWARD => MouseButton::Forward,
        _ => return None,
    })
}

/// Most scroll events one wheel record expands into. Past this the log
/// scroll offset is pinned at one end anyway.
pub fn max_wheel_repeat() -> u32 {
    max_log_scroll(MAX_LOG_LINES) as u32
}

/// Append the terminal events for `event` to `out`.
///
/// Unknown key codes, invalid code points, unknown buttons and pointer
/// events outside `size` produce nothing. A wheel event expands into one
/// scroll event per notch, capped at [`max_wheel_repeat`]. Ctrl+Alt+Shift
/// collapses to Ctrl+Alt.
pub fn translate(event: InputEvent, size: GridSize, out: &mut VecDeque<TermEvent>) {
    match event {
        InputEvent::KeyDown {
            key_code,
            modifiers,
        } => {
            if let Some(key) = key_from_code(key_code) {
                let mut modifiers = modifiers;
                if modifiers.ctrl && modifiers.alt {
                    modifiers.shift = false;
                }
                out.push_back(TermEvent::Key(key, modifiers));
            }
        }
        InputEvent::KeyPress {
            char_code,
            ctrl,
            alt,
        } => {
            if let Some(ch) = char::from_u32(char_code) {
                out.push_back(match (ctrl, alt) {
                    (false, false) => TermEvent::Char(ch),
                    (true, _) => TermEvent::CtrlChar(ch),
                    (false, true) => TermEvent::AltChar(ch),
                });
            }
        }
        InputEvent::MousePress { x, y, button } | InputEvent::MouseRelease { x, y, button } => {
            let Some(button) = button_from_id(button) else {
                return;
            };
            if !size.contains(x, y) {
                return;
            }
            let action = if matches!(event, InputEvent::MousePress { .. }) {
                MouseAction::Press(button)
            } else {
                MouseAction::Release(button)
            };
            out.push_back(TermEvent::Mouse { x, y, action });
        }
        InputEvent::MouseWheel { x, y, notches } => {
            if !size.contains(x, y) {
                return;
            }
            let action = if notches > 0 {
                MouseAction::WheelDown
            } else {
                MouseAction::WheelUp
            };
            for _ in 0..notches.unsigned_abs().min(max_wheel_repeat()) {
                out.push_back(TermEvent::Mouse { x, y, action });
            }
        }
    }
}
