//! Browser resources with deterministic teardown
//!
//! Both guards keep their JS closure alive for as long as the registration
//! exists and undo the registration when dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// A `setInterval` registration
pub struct Interval {
    handle: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let timeout = i32::try_from(period_ms)
            .map_err(|_| JsValue::from_str("interval period out of range"))?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout,
        )?;
        log::debug!("Interval {} started ({} ms)", handle, period_ms);
        Ok(Self {
            handle: Some(handle),
            _closure: closure,
        })
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop future callbacks. Safe to call from inside the callback itself:
    /// the closure stays alive until the guard is dropped.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
            log::debug!("Interval {} cancelled", handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// An `addEventListener` registration
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<E: JsCast>(
        target: &EventTarget,
        event: &'static str,
        mut callback: impl FnMut(E) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            callback(event.unchecked_into::<E>());
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
