use crate::core::{sporadic_delay_ms, WaitRange};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    Timeout,
    Interval,
}

/// A browser timer that fired after a random delay.
#[wasm_bindgen]
pub struct SporadicTimer {
    window: web::Window,
    kind: TimerKind,
    id: i32,
    waited: i32,
}

#[wasm_bindgen]
impl SporadicTimer {
    /// Delay the timer was scheduled with, in milliseconds.
    #[wasm_bindgen(getter)]
    pub fn waited(&self) -> i32 {
        self.waited
    }

    /// Cancel the underlying timer. Always reports `false` (no longer active).
    pub fn clear(&self) -> bool {
        match self.kind {
            TimerKind::Timeout => self.window.clear_timeout_with_handle(self.id),
            TimerKind::Interval => self.window.clear_interval_with_handle(self.id),
        }
        log::debug!("[timer] cleared {:?} #{}", self.kind, self.id);
        false
    }
}

/// Resolve once, after a random delay within `range`.
pub async fn sporadic_timeout(range: WaitRange) -> Result<SporadicTimer, JsValue> {
    schedule(TimerKind::Timeout, range).await
}

/// Resolve on the first tick of an interval with a random period within
/// `range`. The interval keeps running until cleared.
pub async fn sporadic_interval(range: WaitRange) -> Result<SporadicTimer, JsValue> {
    schedule(TimerKind::Interval, range).await
}

async fn schedule(kind: TimerKind, range: WaitRange) -> Result<SporadicTimer, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let waited = sporadic_delay_ms(&mut rand::thread_rng(), range);

    // the executor runs synchronously inside Promise::new
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let promise = {
        let window = window.clone();
        let handle = handle.clone();
        js_sys::Promise::new(&mut |resolve, reject| {
            let scheduled = match kind {
                TimerKind::Timeout => window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, waited),
                TimerKind::Interval => window
                    .set_interval_with_callback_and_timeout_and_arguments_0(&resolve, waited),
            };
            match scheduled {
                Ok(id) => handle.set(Some(id)),
                Err(e) => {
                    _ = reject.call1(&JsValue::NULL, &e);
                }
            }
        })
    };
    if let Some(id) = handle.get() {
        log::debug!("[timer] {:?} #{} in {}ms", kind, id, waited);
    }

    JsFuture::from(promise).await?;
    let id = handle
        .get()
        .ok_or_else(|| JsValue::from_str("timer was not scheduled"))?;
    Ok(SporadicTimer {
        window,
        kind,
        id,
        waited,
    })
}
