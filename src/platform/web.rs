//! Browser implementations of the clock and frame scheduler

use wasm_bindgen::prelude::*;
use web_sys::{Performance, Window};

use super::{Clock, FrameCallback, FrameScheduler};

/// `performance.now()`, falling back to `Date.now()` where the Performance
/// API is missing
pub struct BrowserClock {
    performance: Option<Performance>,
}

impl BrowserClock {
    pub fn new(window: &Window) -> Self {
        let performance = window.performance();
        if performance.is_none() {
            log::warn!("No Performance API, using Date.now() for the fire-rate clock");
        }
        Self { performance }
    }
}

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// `requestAnimationFrame` / `cancelAnimationFrame`
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn schedule(&mut self, callback: FrameCallback) -> Option<i32> {
        // Frees itself after running; a cancelled frame's closure is leaked
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        match self.window.request_animation_frame(closure.unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }
}
