//! Error types for widget initialization.

use thiserror::Error;

/// Errors that can occur while mounting the widget into a host page.
///
/// Initialization is the only fallible surface: configuration anomalies
/// degrade to defaults and storage trouble is swallowed, but a page with no
/// document (or no body to mount into) has nowhere to put the widget.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("document has no body to mount into")]
    NoBody,

    #[error("DOM insertion failed: {0}")]
    Dom(String),
}

impl InitError {
    /// Wraps a raw JS exception from a DOM call.
    pub(crate) fn from_js(value: wasm_bindgen::JsValue) -> Self {
        InitError::Dom(format!("{:?}", value))
    }
}
