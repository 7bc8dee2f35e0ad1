#![forbid(unsafe_code)]

//! Thin `web-sys` helpers shared by both widgets.
//!
//! Only compiled on `wasm32` targets.

use std::fmt;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::actions::{ACTION_ATTR, ROW_ID_ATTR, RowAction, attr_selector, parse_row_id};
use crate::error::WebFormError;
use bimdb_forms_core::RowId;

pub(crate) fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Surface a failure the user would otherwise never see: a `warn!` event
/// for subscribers plus a `console.error` line.
pub(crate) fn report_failure(what: &str, err: &dyn fmt::Display) {
    warn!(what, error = %err, "form editor failure");
    console_error(&format!("{what}: {err}"));
}

pub(crate) fn document() -> Result<Document, WebFormError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| WebFormError::dom("no document available"))
}

// ---------------------------------------------------------------------------
// Backing field
// ---------------------------------------------------------------------------

/// The serialized field the server reads: a `<textarea>` on the stock pages,
/// a text `<input>` is accepted as well.
#[derive(Debug, Clone)]
pub(crate) enum BackingField {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

impl BackingField {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => Some(Self::TextArea(area)),
            Err(element) => element.dyn_into::<HtmlInputElement>().ok().map(Self::Input),
        }
    }

    pub(crate) fn value(&self) -> String {
        match self {
            Self::TextArea(area) => area.value(),
            Self::Input(input) => input.value(),
        }
    }

    pub(crate) fn set_value(&self, value: &str) {
        match self {
            Self::TextArea(area) => area.set_value(value),
            Self::Input(input) => input.set_value(value),
        }
    }

    fn form(&self) -> Option<HtmlFormElement> {
        match self {
            Self::TextArea(area) => area.form(),
            Self::Input(input) => input.form(),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Self::TextArea(area) => area,
            Self::Input(input) => input,
        }
    }

    pub(crate) fn hide(&self) -> Result<(), WebFormError> {
        self.element().style().set_property("display", "none")?;
        Ok(())
    }
}

/// Everything a widget hangs off: the field, the element rows render into,
/// and the form whose submit gets intercepted.
pub(crate) struct Anchors {
    pub field: BackingField,
    pub parent: Element,
    pub form: HtmlFormElement,
}

/// Resolve the field by id. `None` when the field, its parent or its form
/// is missing: the widget is simply not on this page.
pub(crate) fn locate(document: &Document, field_id: &str) -> Option<Anchors> {
    let field = BackingField::from_element(document.get_element_by_id(field_id)?)?;
    let parent = field.element().parent_element()?;
    let form = field.form()?;
    Some(Anchors {
        field,
        parent,
        form,
    })
}

// ---------------------------------------------------------------------------
// Element construction
// ---------------------------------------------------------------------------

pub(crate) fn div(document: &Document, class: &str) -> Result<Element, WebFormError> {
    let element = document.create_element("div")?;
    element.class_list().add_1(class)?;
    Ok(element)
}

/// Row container tagged with its model handle.
pub(crate) fn row_container(
    document: &Document,
    class: &str,
    id: RowId,
) -> Result<Element, WebFormError> {
    let element = div(document, class)?;
    element.set_attribute(ROW_ID_ATTR, &id.to_string())?;
    Ok(element)
}

fn new_input(document: &Document) -> Result<HtmlInputElement, WebFormError> {
    document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| WebFormError::dom("created <input> is not an HtmlInputElement"))
}

pub(crate) fn text_input(
    document: &Document,
    class: &str,
    value: &str,
) -> Result<HtmlInputElement, WebFormError> {
    let input = new_input(document)?;
    input.set_type("text");
    input.class_list().add_1(class)?;
    input.set_value(value);
    Ok(input)
}

pub(crate) fn action_button(
    document: &Document,
    action: RowAction,
    label: &str,
    class: Option<&str>,
) -> Result<HtmlInputElement, WebFormError> {
    let button = new_input(document)?;
    button.set_type("button");
    button.set_value(label);
    button.set_attribute(ACTION_ATTR, action.as_attr())?;
    if let Some(class) = class {
        button.class_list().add_1(class)?;
    }
    Ok(button)
}

/// First direct child of `row` that is an `<input>` carrying `class`.
///
/// Matches on the class list rather than a selector, so any class token
/// resolves, whatever characters it holds.
pub(crate) fn child_input(row: &Element, class: &str) -> Option<HtmlInputElement> {
    let children = row.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter(|child| child.class_list().contains(class))
        .find_map(|child| child.dyn_into::<HtmlInputElement>().ok())
}

/// Focus an element by id if the page has it.
pub(crate) fn focus_by_id(document: &Document, id: &str) -> Result<(), WebFormError> {
    if let Some(element) = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    {
        element.focus()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A click that landed on a generated control.
pub(crate) struct ActionHit {
    pub action: RowAction,
    pub control: Element,
    /// Enclosing row container and its parsed id, for row-level controls.
    pub row: Option<(RowId, Element)>,
}

/// Resolve the control and row a click event targets, if any.
pub(crate) fn action_hit(event: &Event) -> Result<Option<ActionHit>, WebFormError> {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return Ok(None);
    };
    let Some(control) = target.closest(&attr_selector(ACTION_ATTR))? else {
        return Ok(None);
    };
    let Some(action) = control
        .get_attribute(ACTION_ATTR)
        .as_deref()
        .and_then(RowAction::from_attr)
    else {
        return Ok(None);
    };
    let row = control
        .closest(&attr_selector(ROW_ID_ATTR))?
        .and_then(|row| {
            parse_row_id(row.get_attribute(ROW_ID_ATTR).as_deref()).map(|id| (id, row))
        });
    Ok(Some(ActionHit {
        action,
        control,
        row,
    }))
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebFormError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
