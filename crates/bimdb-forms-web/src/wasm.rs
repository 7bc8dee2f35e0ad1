#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the form editors.
//!
//! Only compiled on `wasm32` targets.

use bimdb_forms_core::{OrderedListConfig, PropertyListConfig};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom::{self, console_error};
use crate::error::WebFormError;
use crate::ordered_list::OrderedListWidget;
use crate::property_list::PropertyListWidget;

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "bimdb-forms panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("bimdb-forms panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

/// Run `setup` now if the document has finished loading, otherwise once
/// `DOMContentLoaded` fires. Errors from a deferred run go to
/// `console.error`.
fn when_ready(
    what: &'static str,
    setup: impl FnOnce(&Document) -> Result<(), WebFormError> + 'static,
) -> Result<(), WebFormError> {
    install_panic_hook();
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        return setup(&document);
    }

    debug!(what, "setup deferred until DOMContentLoaded");
    let deferred = document.clone();
    let closure = Closure::once(move || {
        if let Err(err) = setup(&deferred) {
            console_error(&format!("{what} failed: {err}"));
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn mount_property_list(
    document: &Document,
    config: PropertyListConfig,
) -> Result<(), WebFormError> {
    PropertyListWidget::mount(document, config).map(drop)
}

fn mount_ordered_list(document: &Document, config: OrderedListConfig) -> Result<(), WebFormError> {
    OrderedListWidget::mount(document, config).map(drop)
}

// ---------------------------------------------------------------------------
// Property list
// ---------------------------------------------------------------------------

/// Set up the property-list editor once the document is ready.
#[wasm_bindgen(js_name = setUpAddEdit)]
pub fn set_up_add_edit() -> Result<(), JsValue> {
    when_ready("property list setup", |document| {
        mount_property_list(document, PropertyListConfig::default())
    })?;
    Ok(())
}

/// Set up the property-list editor immediately.
#[wasm_bindgen(js_name = doSetUpAddEdit)]
pub fn do_set_up_add_edit() -> Result<(), JsValue> {
    install_panic_hook();
    mount_property_list(&dom::document()?, PropertyListConfig::default())?;
    Ok(())
}

/// Set up the property-list editor immediately with a JSON config override.
#[wasm_bindgen(js_name = setUpAddEditWith)]
pub fn set_up_add_edit_with(config_json: &str) -> Result<(), JsValue> {
    install_panic_hook();
    let config = PropertyListConfig::from_json_str(config_json).map_err(WebFormError::from)?;
    mount_property_list(&dom::document()?, config)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Ordered list
// ---------------------------------------------------------------------------

/// Set up the ordered-list editor once the document is ready.
#[wasm_bindgen(js_name = setUpCouplingAddEdit)]
pub fn set_up_coupling_add_edit() -> Result<(), JsValue> {
    when_ready("ordered list setup", |document| {
        mount_ordered_list(document, OrderedListConfig::default())
    })?;
    Ok(())
}

/// Set up the ordered-list editor immediately.
#[wasm_bindgen(js_name = doSetUpCouplingAddEdit)]
pub fn do_set_up_coupling_add_edit() -> Result<(), JsValue> {
    install_panic_hook();
    mount_ordered_list(&dom::document()?, OrderedListConfig::default())?;
    Ok(())
}

/// Set up the ordered-list editor immediately with a JSON config override.
#[wasm_bindgen(js_name = setUpCouplingAddEditWith)]
pub fn set_up_coupling_add_edit_with(config_json: &str) -> Result<(), JsValue> {
    install_panic_hook();
    let config = OrderedListConfig::from_json_str(config_json).map_err(WebFormError::from)?;
    mount_ordered_list(&dom::document()?, config)?;
    Ok(())
}
