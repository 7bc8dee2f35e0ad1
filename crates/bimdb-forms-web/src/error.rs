#![forbid(unsafe_code)]

//! Error type of the DOM binding.

use bimdb_forms_core::FormError;
use thiserror::Error;

/// Failure while mounting or driving an editor in the page.
#[derive(Debug, Error)]
pub enum WebFormError {
    /// The backing value or the configuration was rejected.
    #[error(transparent)]
    Form(#[from] FormError),

    /// A browser API call failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl WebFormError {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub(crate) fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebFormError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        use wasm_bindgen::JsCast;

        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(msg)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebFormError> for wasm_bindgen::JsValue {
    fn from(err: WebFormError) -> Self {
        wasm_bindgen::JsError::new(&err.to_string()).into()
    }
}
