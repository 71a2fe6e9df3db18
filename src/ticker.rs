//! Browser timers that stop themselves when dropped.
//!
//! Effects hold one of these and drop it in their teardown closure, so an
//! interval never outlives the component (and store handle) it was set up by.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::{GardenError, Result};

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| GardenError::Dom("no window".into()))
}

/// Browser timers take an `i32` delay; larger values would wrap negative.
fn js_delay(field: &'static str, ms: u32) -> Result<i32> {
    i32::try_from(ms).map_err(|_| GardenError::InvalidNumber { field, value: ms.to_string() })
}

pub struct Interval {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: u32, f: impl FnMut() + 'static) -> Result<Self> {
        let period = js_delay("interval period", period_ms)?;
        let window = window()?;
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period,
        )?;
        Ok(Self { window, id, _callback: callback })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

pub struct Timeout {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn start(delay_ms: u32, f: impl FnMut() + 'static) -> Result<Self> {
        let delay = js_delay("timeout delay", delay_ms)?;
        let window = window()?;
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        )?;
        Ok(Self { window, id, _callback: callback })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.id);
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn sleep(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_interval_stops_when_dropped() {
        let hits = Rc::new(Cell::new(0_u32));
        let counter = hits.clone();
        let interval = Interval::start(20, move || counter.set(counter.get() + 1)).unwrap();
        sleep(110).await;
        assert!(hits.get() > 0);

        drop(interval);
        let at_drop = hits.get();
        sleep(150).await;
        assert_eq!(hits.get(), at_drop);
    }

    #[wasm_bindgen_test]
    async fn test_timeout_dropped_before_firing_never_runs() {
        let hits = Rc::new(Cell::new(0_u32));
        let counter = hits.clone();
        let timeout = Timeout::start(40, move || counter.set(counter.get() + 1)).unwrap();
        drop(timeout);
        sleep(150).await;
        assert_eq!(hits.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn test_timeout_fires_once_while_held() {
        let hits = Rc::new(Cell::new(0_u32));
        let counter = hits.clone();
        let _timeout = Timeout::start(20, move || counter.set(counter.get() + 1)).unwrap();
        sleep(150).await;
        assert_eq!(hits.get(), 1);
    }
}
