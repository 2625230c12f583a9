//! Errors raised while mounting the overlay or drawing a frame.
//!
//! Pointer handling itself never fails: unknown ids are ignored. Only the
//! browser host (window, document, canvas context) and config parsing have
//! failure modes, and those are reported through [`LayerError`].

use wasm_bindgen::JsValue;

/// Errors produced by host setup, configuration, and rendering.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// No global `window` exists (not running in a browser main thread).
    #[error("no global window")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// The document has no `<body>` to attach the overlay to.
    #[error("document has no body")]
    NoBody,

    /// The canvas refused to hand out a 2D rendering context.
    #[error("canvas 2d context unavailable")]
    NoContext,

    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),

    /// The config JSON could not be parsed.
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),

    /// A config value is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl From<JsValue> for LayerError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<LayerError> for JsValue {
    fn from(err: LayerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
