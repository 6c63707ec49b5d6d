//! `wasm-bindgen` entry point and DOM wiring.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent, WheelEvent};

use glyph_loop_core::SimulationDriver;
use glyph_loop_engine::Dungeon;
use glyph_loop_input::{
    CellMapper, InputNormalizer, RawKeyDown, RawKeyPress, RawPointer, RawWheel,
};
use glyph_loop_term::{DrawSink, FrameLoop, FrameScheduler};
use glyph_loop_types::{GridSize, KeyModifiers, Rgb};

use crate::{position_to_cell, seed_from_random};

#[wasm_bindgen]
extern "C" {
    /// Character display supplied by the page.
    type Display;

    #[wasm_bindgen(method)]
    fn draw(this: &Display, x: u16, y: u16, ch: &str, fg: &str, bg: &str);

    #[wasm_bindgen(method, js_name = eventToPosition)]
    fn event_to_position(this: &Display, event: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = getContainer)]
    fn get_container(this: &Display) -> Option<web_sys::Element>;
}

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Display-backed sink. Detached when the page passed no display.
#[derive(Clone)]
struct DisplaySink {
    display: Option<Display>,
    size: GridSize,
}

impl DrawSink for DisplaySink {
    fn draw(&mut self, x: u16, y: u16, glyph: char, fg: Rgb, bg: Rgb) {
        if let Some(display) = &self.display {
            let mut buf = [0u8; 4];
            display.draw(x, y, glyph.encode_utf8(&mut buf), &fg.to_hex(), &bg.to_hex());
        }
    }

    fn is_attached(&self) -> bool {
        self.display.is_some()
    }
}

impl CellMapper for DisplaySink {
    fn map_pixel_to_cell(&self, px: i32, py: i32) -> Option<(u16, u16)> {
        let display = self.display.as_ref()?;
        let event = Object::new();
        Reflect::set(&event, &"clientX".into(), &JsValue::from(px)).ok()?;
        Reflect::set(&event, &"clientY".into(), &JsValue::from(py)).ok()?;
        let pos: Array = display.event_to_position(&event).dyn_into().ok()?;
        position_to_cell(pos.get(0).as_f64()?, pos.get(1).as_f64()?, self.size)
    }
}

/// Records the request; the frame callback re-registers itself when set.
#[derive(Default)]
struct AnimationFrame {
    requested: bool,
}

impl FrameScheduler for AnimationFrame {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

fn listen<T, F>(target: &web_sys::EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    T: FromWasmAbi + 'static,
    F: FnMut(T) + 'static,
{
    let closure = Closure::<dyn FnMut(T)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn pointer(e: &MouseEvent) -> RawPointer {
    RawPointer {
        pixel_x: e.client_x(),
        pixel_y: e.client_y(),
        button: e.button().max(0) as u32,
    }
}

fn install_listeners(
    normalizer: &Rc<RefCell<InputNormalizer>>,
    sink: &DisplaySink,
) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let n = normalizer.clone();
    listen(&document, "keydown", move |e: KeyboardEvent| {
        let raw = RawKeyDown {
            key_code: e.key_code(),
            key: e.key(),
            modifiers: KeyModifiers::new(e.ctrl_key(), e.alt_key(), e.shift_key()),
        };
        if n.borrow_mut().key_down(&raw).is_suppressed() {
            e.prevent_default();
        }
    })?;

    let n = normalizer.clone();
    listen(&document, "keypress", move |e: KeyboardEvent| {
        let raw = RawKeyPress {
            char_code: e.char_code(),
            ctrl: e.ctrl_key(),
            alt: e.alt_key(),
        };
        if n.borrow_mut().key_press(&raw).is_suppressed() {
            e.prevent_default();
        }
    })?;

    let Some(container) = sink.display.as_ref().and_then(|d| d.get_container()) else {
        return Ok(());
    };

    let (n, mapper) = (normalizer.clone(), sink.clone());
    listen(&container, "mousedown", move |e: MouseEvent| {
        if n.borrow_mut().mouse_down(&pointer(&e), &mapper).is_suppressed() {
            e.prevent_default();
        }
    })?;

    let (n, mapper) = (normalizer.clone(), sink.clone());
    listen(&container, "mouseup", move |e: MouseEvent| {
        if n.borrow_mut().mouse_up(&pointer(&e), &mapper).is_suppressed() {
            e.prevent_default();
        }
    })?;

    let (n, mapper) = (normalizer.clone(), sink.clone());
    listen(&container, "wheel", move |e: WheelEvent| {
        let raw = RawWheel {
            pixel_x: e.client_x(),
            pixel_y: e.client_y(),
            delta_y: e.delta_y(),
        };
        if n.borrow_mut().wheel(&raw, &mapper).is_suppressed() {
            e.prevent_default();
        }
    })?;

    Ok(())
}

/// Start a session on `display` (or detached, when `display` is null).
#[wasm_bindgen]
pub fn start(display: JsValue, width: u16, height: u16) -> Result<(), JsValue> {
    install_panic_hook();

    let size = GridSize::new(width, height);
    let display = (!display.is_null() && !display.is_undefined())
        .then(|| display.unchecked_into::<Display>());
    let mut sink = DisplaySink { display, size };

    // Listeners go in first; whatever fires before the engine exists is dropped.
    let normalizer = Rc::new(RefCell::new(InputNormalizer::new()));
    install_listeners(&normalizer, &sink)?;

    let seed = seed_from_random(js_sys::Math::random());
    web_sys::console::log_1(&JsValue::from_str(&format!("game seed: {seed}")));
    let mut frames = FrameLoop::new(SimulationDriver::<Dungeon>::launch(seed, size));
    normalizer.borrow_mut().attach(frames.input_queue());

    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();
    *callback.borrow_mut() = Some(Closure::new(move || {
        let mut scheduler = AnimationFrame::default();
        if let Err(err) = frames.tick(Some(&mut sink), &mut scheduler) {
            console_error(&format!("simulation stopped: {err}"));
            return;
        }
        if scheduler.requested {
            if let Some(cb) = next.borrow().as_ref() {
                if let Err(err) = request_animation_frame(cb) {
                    console_error(&format!("requestAnimationFrame failed: {err:?}"));
                }
            }
        }
    }));

    match callback.borrow().as_ref() {
        Some(cb) => request_animation_frame(cb),
        None => Ok(()),
    }
}
