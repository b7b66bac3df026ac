//! WASM bindings for running the enrichment pipeline in the browser.
//!
//! Exposes the pure transforms to JavaScript via wasm-bindgen; the stateful
//! machines stay host-side where the event loop lives.

use wasm_bindgen::prelude::*;

use crate::outline::enrich;
use crate::sanitize::sanitize;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Sanitize an untrusted CMS fragment.
#[wasm_bindgen]
pub fn sanitize_html(raw: &str) -> String {
    sanitize(raw).into_string()
}

/// Sanitize and annotate: heading ids injected, images marked zoomable.
/// The returned markup is what the trusted injection point should render.
#[wasm_bindgen]
pub fn enrich_html(raw: &str) -> String {
    let sanitized = sanitize(raw);
    enrich(&sanitized).0.into_string()
}

/// Extract the outline (headings + images) as JSON.
#[wasm_bindgen]
pub fn outline_json(raw: &str) -> std::result::Result<String, JsValue> {
    let sanitized = sanitize(raw);
    let (_, outline) = enrich(&sanitized);
    serde_json::to_string(&outline).map_err(|e| JsValue::from_str(&e.to_string()))
}
