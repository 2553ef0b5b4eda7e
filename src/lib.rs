#![cfg(target_arch = "wasm32")]
use crate::core::{Heading, MotionPath, SoundConfig, TimeValue, WaitRange};
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod core;
mod dom;
mod overlay;
mod timers;

pub use timers::SporadicTimer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("motion-fx ready");
    Ok(())
}

/// Draws motion curves into a full-viewport SVG overlay.
///
/// Each instance mounts its own overlay; the application keeps the instance
/// for as long as it wants to draw.
#[wasm_bindgen]
pub struct MotionPathDrawer {
    overlay: overlay::MotionPathOverlay,
}

#[wasm_bindgen]
impl MotionPathDrawer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MotionPathDrawer, JsValue> {
        let window = dom::window().map_err(dom::to_js)?;
        let overlay = overlay::MotionPathOverlay::mount(&window).map_err(dom::to_js)?;
        Ok(MotionPathDrawer { overlay })
    }

    /// Draw `{start: {top, left}, end: {top, left}}`.
    pub fn draw(&mut self, path: JsValue) -> Result<HeadingView, JsValue> {
        let path = motion_path_from_js(&path).map_err(dom::to_js)?;
        let heading = self.overlay.draw(path).map_err(dom::to_js)?;
        Ok(HeadingView::from(heading))
    }

    #[wasm_bindgen(js_name = setDuration)]
    pub fn set_duration(&mut self, duration_ms: f64) {
        self.overlay.set_duration(duration_ms);
    }

    pub fn heading(&self) -> Option<HeadingView> {
        self.overlay.heading().map(HeadingView::from)
    }
}

fn motion_path_from_js(value: &JsValue) -> anyhow::Result<MotionPath> {
    let json = js_sys::JSON::stringify(value)
        .map_err(dom::js_err)?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("motion path is not serializable"))?;
    Ok(serde_json::from_str(&json)?)
}

/// Read-only snapshot of a [`Heading`] handed to JavaScript.
#[wasm_bindgen]
pub struct HeadingView {
    heading: Heading,
}

impl From<&Heading> for HeadingView {
    fn from(heading: &Heading) -> Self {
        Self {
            heading: heading.clone(),
        }
    }
}

#[wasm_bindgen]
impl HeadingView {
    #[wasm_bindgen(getter)]
    pub fn vertical(&self) -> String {
        self.heading.vertical.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn horizontal(&self) -> String {
        self.heading.horizontal.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn distance(&self) -> f64 {
        self.heading.distance
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.heading.duration()
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> Option<f64> {
        self.heading.speed()
    }

    #[wasm_bindgen(getter, js_name = speedRating)]
    pub fn speed_rating(&self) -> Option<String> {
        self.heading.speed_rating().map(|r| r.as_str().to_string())
    }
}

#[wasm_bindgen(js_name = randomIntClamp)]
pub fn random_int_clamp(min: i32, max: i32) -> i32 {
    crate::core::random_int_clamp(min, max)
}

/// Numbers are converted to milliseconds, numeric strings are parsed and
/// returned unconverted. Anything else is `NaN`.
#[wasm_bindgen]
pub fn seconds(value: JsValue) -> f64 {
    if let Some(n) = value.as_f64() {
        crate::core::seconds(TimeValue::Number(n))
    } else if let Some(s) = value.as_string() {
        crate::core::seconds(TimeValue::Text(&s))
    } else {
        f64::NAN
    }
}

#[wasm_bindgen(js_name = sporadicTimeout)]
pub async fn sporadic_timeout(
    wait_min: Option<i32>,
    wait_max: Option<i32>,
) -> Result<SporadicTimer, JsValue> {
    timers::sporadic_timeout(WaitRange::or_default(wait_min, wait_max)).await
}

#[wasm_bindgen(js_name = sporadicInterval)]
pub async fn sporadic_interval(
    wait_min: Option<i32>,
    wait_max: Option<i32>,
) -> Result<SporadicTimer, JsValue> {
    timers::sporadic_interval(WaitRange::or_default(wait_min, wait_max)).await
}

#[wasm_bindgen(js_name = playSound)]
pub async fn play_sound(key: String) -> Result<(), JsValue> {
    audio::play_sound(&SoundConfig::default(), &key)
        .await
        .map_err(|e| {
            log::error!("[sound] {:#}", e);
            dom::to_js(e)
        })
}

#[wasm_bindgen(js_name = playRandomSound)]
pub async fn play_random_sound(keys: Vec<String>) -> Result<(), JsValue> {
    audio::play_random_sound(&SoundConfig::default(), &keys)
        .await
        .map_err(|e| {
            log::error!("[sound] {:#}", e);
            dom::to_js(e)
        })
}
