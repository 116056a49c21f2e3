//! Browser host
//!
//! Drives a [`Game`] from `requestAnimationFrame`, feeds keyboard (Space),
//! touch and click events into its input latch, and passes each frame's
//! snapshot to a JavaScript renderer callback as JSON.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent, Window};

use crate::game::Game;
use crate::tuning::{Tuning, World};

type FrameClosure = Closure<dyn FnMut(f64)>;
type EventClosure = Closure<dyn FnMut(Event)>;

/// A registered DOM listener, kept so it can be removed again
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: EventClosure,
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Skyflap starting...");
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Schedule the stored frame closure; `None` if nothing could be scheduled
fn request_frame(slot: &RefCell<Option<FrameClosure>>) -> Option<i32> {
    let window = web_sys::window()?;
    let slot = slot.borrow();
    let closure = slot.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            None
        }
    }
}

/// Game bound to the browser's frame loop
#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<Game>>,
    on_frame: js_sys::Function,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_closure: Rc<RefCell<Option<FrameClosure>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebGame {
    /// `on_frame` receives one JSON snapshot string per animation frame
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, on_frame: js_sys::Function) -> Result<WebGame, JsValue> {
        let tuning = Tuning::for_world(World::new(width, height));
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, seed).map_err(to_js)?;
        Ok(Self {
            game: Rc::new(RefCell::new(game)),
            on_frame,
            running: Rc::new(Cell::new(false)),
            frame_id: Rc::new(Cell::new(None)),
            frame_closure: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Attach input listeners and start the frame loop
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.running.get() {
            return Ok(());
        }
        let window = window()?;
        self.attach_listeners(&window)?;

        if self.frame_closure.borrow().is_none() {
            let game = self.game.clone();
            let on_frame = self.on_frame.clone();
            let running = self.running.clone();
            let frame_id = self.frame_id.clone();
            let slot = self.frame_closure.clone();
            let closure = FrameClosure::new(move |time: f64| {
                if !running.get() {
                    return;
                }
                let snapshot = game.borrow_mut().frame(time);
                match snapshot.to_json() {
                    Ok(json) => {
                        if let Err(e) = on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                            log::warn!("Renderer callback failed: {e:?}");
                        }
                    }
                    Err(e) => log::error!("Snapshot serialization failed: {e}"),
                }
                // The callback may have stopped the loop
                if running.get() {
                    frame_id.set(request_frame(&slot));
                }
            });
            *self.frame_closure.borrow_mut() = Some(closure);
        }

        self.running.set(true);
        self.frame_id.set(request_frame(&self.frame_closure));
        log::info!("Frame loop started");
        Ok(())
    }

    /// Cancel the pending frame and detach listeners
    ///
    /// No frame callback runs after this returns.
    pub fn stop(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            if let Err(e) = window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                log::warn!("Failed to remove {} listener: {e:?}", listener.kind);
            }
        }
        self.game.borrow_mut().suspend();
        log::info!("Frame loop stopped");
    }

    /// Programmatic activate (e.g. an on-screen button)
    pub fn activate(&self) {
        self.game.borrow().activate();
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.game
            .borrow_mut()
            .resize(World::new(width, height))
            .map_err(to_js)
    }

    pub fn score(&self) -> u32 {
        self.game.borrow().state().score
    }

    fn attach_listeners(&mut self, window: &Window) -> Result<(), JsValue> {
        let latch = self.game.borrow().latch();
        let target: &EventTarget = window.as_ref();

        // Space only, so browser shortcuts keep working
        {
            let latch = latch.clone();
            let closure = EventClosure::new(move |event: Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    if key.code() == "Space" {
                        event.prevent_default();
                        latch.signal();
                    }
                }
            });
            self.listen(target, "keydown", closure)?;
        }

        // preventDefault here suppresses the synthetic click that follows a tap
        {
            let latch = latch.clone();
            let closure = EventClosure::new(move |event: Event| {
                event.prevent_default();
                latch.signal();
            });
            self.listen(target, "touchstart", closure)?;
        }

        {
            let closure = EventClosure::new(move |event: Event| {
                event.prevent_default();
                latch.signal();
            });
            self.listen(target, "click", closure)?;
        }

        Ok(())
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        closure: EventClosure,
    ) -> Result<(), JsValue> {
        // Listeners call preventDefault, which passive listeners ignore
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }
}

impl Drop for WebGame {
    fn drop(&mut self) {
        self.stop();
        // Break the closure -> slot reference cycle
        self.frame_closure.borrow_mut().take();
    }
}
