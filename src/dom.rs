use crate::core::Viewport;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow::anyhow!("no window"))
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

#[inline]
pub fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Current inner size of the window in CSS pixels.
pub fn viewport(window: &web::Window) -> anyhow::Result<Viewport> {
    let width = window
        .inner_width()
        .map_err(js_err)?
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("innerWidth is not a number"))?;
    let height = window
        .inner_height()
        .map_err(js_err)?
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("innerHeight is not a number"))?;
    Ok(Viewport::new(width, height))
}
