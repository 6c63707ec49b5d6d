//! Mapping from crossterm events to raw normalizer records.
//!
//! A terminal reports pointer positions in cells already, so the pixel fields
//! of the produced records carry cell coordinates and the host pairs them with
//! an identity [`CellMapper`](crate::CellMapper).

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers as TermModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use glyph_loop_types::{key_codes, mouse_buttons, KeyModifiers};

use crate::normalizer::{RawKeyDown, RawKeyPress, RawPointer, RawWheel};

/// The key-down and key-press records one terminal key event stands for.
///
/// Printable characters and Enter produce both, like a browser firing
/// `keydown` followed by `keypress`. Other named keys only produce the
/// key-down.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawKeyInput {
    pub down: Option<RawKeyDown>,
    pub press: Option<RawKeyPress>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawMouseInput {
    Down(RawPointer),
    Up(RawPointer),
    Wheel(RawWheel),
}

fn modifiers(m: TermModifiers) -> KeyModifiers {
    KeyModifiers::new(
        m.contains(TermModifiers::CONTROL),
        m.contains(TermModifiers::ALT),
        m.contains(TermModifiers::SHIFT),
    )
}

/// DOM-style key code for a printable character.
fn char_key_code(c: char) -> u32 {
    match c {
        'a'..='z' => c.to_ascii_uppercase() as u32,
        'A'..='Z' | '0'..='9' | ' ' => c as u32,
        _ => 0,
    }
}

fn named_key(code: KeyCode) -> Option<(u32, String)> {
    let (code, name) = match code {
        KeyCode::Backspace => (key_codes::BACKSPACE, "Backspace"),
        KeyCode::Tab | KeyCode::BackTab => (key_codes::TAB, "Tab"),
        KeyCode::Enter => (key_codes::ENTER, "Enter"),
        KeyCode::Esc => (key_codes::ESCAPE, "Escape"),
        KeyCode::PageUp => (key_codes::PAGE_UP, "PageUp"),
        KeyCode::PageDown => (key_codes::PAGE_DOWN, "PageDown"),
        KeyCode::End => (key_codes::END, "End"),
        KeyCode::Home => (key_codes::HOME, "Home"),
        KeyCode::Left => (key_codes::LEFT, "ArrowLeft"),
        KeyCode::Up => (key_codes::UP, "ArrowUp"),
        KeyCode::Right => (key_codes::RIGHT, "ArrowRight"),
        KeyCode::Down => (key_codes::DOWN, "ArrowDown"),
        KeyCode::Insert => (key_codes::INSERT, "Insert"),
        KeyCode::Delete => (key_codes::DELETE, "Delete"),
        KeyCode::Pause => (key_codes::PAUSE_BREAK, "Pause"),
        KeyCode::F(n @ 1..=12) => return Some((key_codes::F1 + n as u32 - 1, format!("F{n}"))),
        _ => return None,
    };
    Some((code, name.to_string()))
}

/// Convert a crossterm key event. Releases and keys with no DOM equivalent
/// map to `None`.
pub fn key_event_to_raw(key: KeyEvent) -> Option<RawKeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let mut mods = modifiers(key.modifiers);

    match key.code {
        KeyCode::Char(c) => {
            let down = RawKeyDown {
                key_code: char_key_code(c),
                key: c.to_string(),
                modifiers: mods,
            };
            let press = RawKeyPress {
                char_code: c as u32,
                ctrl: mods.ctrl,
                alt: mods.alt,
            };
            Some(RawKeyInput {
                down: Some(down),
                press: Some(press),
            })
        }
        code => {
            let (key_code, name) = named_key(code)?;
            if code == KeyCode::BackTab {
                mods.shift = true;
            }
            let press = (code == KeyCode::Enter).then_some(RawKeyPress {
                char_code: '\r' as u32,
                ctrl: mods.ctrl,
                alt: mods.alt,
            });
            Some(RawKeyInput {
                down: Some(RawKeyDown {
                    key_code,
                    key: name,
                    modifiers: mods,
                }),
                press,
            })
        }
    }
}

fn button_id(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => mouse_buttons::LEFT,
        MouseButton::Middle => mouse_buttons::MIDDLE,
        MouseButton::Right => mouse_buttons::RIGHT,
    }
}

/// Convert a crossterm mouse event. Moves, drags and horizontal scrolling
/// have no counterpart and map to `None`.
pub fn mouse_event_to_raw(mouse: MouseEvent) -> Option<RawMouseInput> {
    let pixel_x = mouse.column as i32;
    let pixel_y = mouse.row as i32;
    let wheel = |delta_y| {
        RawMouseInput::Wheel(RawWheel {
            pixel_x,
            pixel_y,
            delta_y,
        })
    };

    match mouse.kind {
        MouseEventKind::Down(button) => Some(RawMouseInput::Down(RawPointer {
            pixel_x,
            pixel_y,
            button: button_id(button),
        })),
        MouseEventKind::Up(button) => Some(RawMouseInput::Up(RawPointer {
            pixel_x,
            pixel_y,
            button: button_id(button),
        })),
        MouseEventKind::ScrollDown => Some(wheel(1.0)),
        MouseEventKind::ScrollUp => Some(wheel(-1.0)),
        _ => None,
    }
}

/// Ctrl+C ends the session.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(TermModifiers::CONTROL)
}
