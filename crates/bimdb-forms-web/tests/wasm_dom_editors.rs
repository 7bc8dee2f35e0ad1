#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Browser tests: mount both editors into throwaway forms and drive them
//! through real click and submit events.
//!
//! Fixture forms use `method="dialog"`, so the programmatic resubmit after a
//! flush does not navigate away from the test page.

use bimdb_forms_core::{FormError, OrderedListConfig, PropertyListConfig};
use bimdb_forms_web::actions::{ACTION_ATTR, RowAction};
use bimdb_forms_web::{OrderedListWidget, PropertyListWidget, WebFormError};
use pretty_assertions::assert_eq;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
};

wasm_bindgen_test_configure!(run_in_browser);

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct Fixture {
    document: Document,
    form: Element,
    parent: Element,
    field: HtmlTextAreaElement,
}

impl Fixture {
    fn new(field_id: &str, value: &str) -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let form = document.create_element("form").unwrap();
        form.set_attribute("method", "dialog").unwrap();
        let parent = document.create_element("div").unwrap();
        let field: HtmlTextAreaElement = document
            .create_element("textarea")
            .unwrap()
            .dyn_into()
            .unwrap();
        field.set_id(field_id);
        field.set_value(value);
        parent.append_child(&field).unwrap();
        form.append_child(&parent).unwrap();
        document.body().unwrap().append_child(&form).unwrap();
        Self {
            document,
            form,
            parent,
            field,
        }
    }

    fn rows(&self, class: &str) -> Vec<Element> {
        let list = self.parent.query_selector_all(&format!(".{class}")).unwrap();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|node| node.dyn_into::<Element>().unwrap())
            .collect()
    }

    fn values(&self, input_class: &str) -> Vec<String> {
        let list = self
            .parent
            .query_selector_all(&format!("input.{input_class}"))
            .unwrap();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|node| node.dyn_into::<HtmlInputElement>().unwrap().value())
            .collect()
    }

    fn add_button(&self, add_class: &str) -> HtmlElement {
        control(
            &self
                .parent
                .query_selector(&format!(".{add_class}"))
                .unwrap()
                .unwrap(),
            RowAction::Add,
        )
    }

    /// Dispatch a cancelable `submit` on the form. Returns `false` when a
    /// listener called `preventDefault`.
    fn submit(&self) -> bool {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("submit", &init).unwrap();
        self.form.dispatch_event(&event).unwrap()
    }

    fn field_hidden(&self) -> bool {
        self.field.style().get_property_value("display").unwrap() == "none"
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.form.remove();
    }
}

fn control(scope: &Element, action: RowAction) -> HtmlElement {
    scope
        .query_selector(&format!("[{ACTION_ATTR}=\"{}\"]", action.as_attr()))
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn is_disabled(scope: &Element, action: RowAction) -> bool {
    control(scope, action)
        .dyn_into::<HtmlInputElement>()
        .unwrap()
        .disabled()
}

fn property_config(id: &str) -> PropertyListConfig {
    PropertyListConfig {
        backing_field_id: id.to_owned(),
        ..PropertyListConfig::default()
    }
}

fn ordered_config(id: &str) -> OrderedListConfig {
    OrderedListConfig {
        backing_field_id: id.to_owned(),
        ..OrderedListConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property list
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn property_list_renders_rows_and_hides_field() {
    let fx = Fixture::new("pl-render", r#"{"a":"1","b":"2"}"#);
    let widget = PropertyListWidget::mount(&fx.document, property_config("pl-render"))
        .unwrap()
        .unwrap();

    assert_eq!(widget.row_count(), 2);
    assert_eq!(fx.rows("other-data-entry").len(), 2);
    assert_eq!(fx.values("key"), vec!["a", "b"]);
    assert_eq!(fx.values("value"), vec!["1", "2"]);
    assert!(fx.field_hidden());
}

#[wasm_bindgen_test]
fn property_list_remove_first_then_flush() {
    let fx = Fixture::new("pl-remove", r#"{"a":"1","b":"2"}"#);
    let widget = PropertyListWidget::mount(&fx.document, property_config("pl-remove"))
        .unwrap()
        .unwrap();

    let first = fx.rows("other-data-entry").remove(0);
    control(&first, RowAction::Remove).click();
    assert_eq!(widget.row_count(), 1);

    assert_eq!(widget.flush_to_field(), r#"{"b":"2"}"#);
    assert_eq!(fx.field.value(), r#"{"b":"2"}"#);
    assert!(fx.rows("other-data-entry").is_empty());
}

#[wasm_bindgen_test]
fn property_list_add_picks_up_typed_values() {
    let fx = Fixture::new("pl-add", "{}");
    let widget = PropertyListWidget::mount(&fx.document, property_config("pl-add"))
        .unwrap()
        .unwrap();
    assert_eq!(widget.row_count(), 0);

    fx.add_button("add-other-data-entry").click();
    let row = fx.rows("other-data-entry").remove(0);
    let key: HtmlInputElement = row
        .query_selector("input.key")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let value: HtmlInputElement = row
        .query_selector("input.value")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    key.set_value("gauge");
    value.set_value("1435");

    assert_eq!(widget.flush_to_field(), r#"{"gauge":"1435"}"#);
}

#[wasm_bindgen_test]
fn property_list_rejects_non_object_before_touching_the_page() {
    let fx = Fixture::new("pl-array", "[1,2]");
    let result = PropertyListWidget::mount(&fx.document, property_config("pl-array"));

    assert!(matches!(result, Err(WebFormError::Form(_))));
    assert!(fx.rows("add-other-data-entry").is_empty());
    assert!(!fx.field_hidden());
}

#[wasm_bindgen_test]
fn property_list_submit_event_rewrites_field_once() {
    let fx = Fixture::new("pl-submit", r#"{"a":"1","b":"2"}"#);
    let widget = PropertyListWidget::mount(&fx.document, property_config("pl-submit"))
        .unwrap()
        .unwrap();

    let second = fx.rows("other-data-entry").remove(1);
    let value: HtmlInputElement = second
        .query_selector("input.value")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    value.set_value("3");

    assert!(!fx.submit(), "first submit is intercepted");
    assert_eq!(fx.field.value(), r#"{"a":"1","b":"3"}"#);
    assert!(fx.rows("other-data-entry").is_empty());
    assert_eq!(widget.row_count(), 0);

    assert!(fx.submit(), "later submits pass through");
    assert_eq!(fx.field.value(), r#"{"a":"1","b":"3"}"#);
    assert_eq!(widget.flush_to_field(), r#"{"a":"1","b":"3"}"#);
}

#[wasm_bindgen_test]
fn property_list_submit_drops_rows_missing_an_input() {
    let fx = Fixture::new("pl-partial", r#"{"a":"1","b":"2"}"#);
    PropertyListWidget::mount(&fx.document, property_config("pl-partial"))
        .unwrap()
        .unwrap();

    let first = fx.rows("other-data-entry").remove(0);
    first.query_selector("input.key").unwrap().unwrap().remove();

    assert!(!fx.submit());
    assert_eq!(fx.field.value(), r#"{"b":"2"}"#);
    assert!(fx.rows("other-data-entry").is_empty());
}

#[wasm_bindgen_test]
fn property_list_rejects_non_identifier_classes() {
    let fx = Fixture::new("pl-classes", r#"{"a":"1"}"#);
    let mut config = property_config("pl-classes");
    config.classes.key = "kv.key".to_owned();
    config.classes.value = "1st".to_owned();

    let result = PropertyListWidget::mount(&fx.document, config);
    assert!(matches!(
        result,
        Err(WebFormError::Form(FormError::Config(ref errors))) if errors.len() == 2
    ));
    assert!(fx.rows("add-other-data-entry").is_empty());
    assert!(!fx.field_hidden());
}

#[wasm_bindgen_test]
fn property_list_absent_field_is_a_no_op() {
    let document = web_sys::window().unwrap().document().unwrap();
    let mounted = PropertyListWidget::mount(&document, property_config("pl-missing")).unwrap();
    assert!(mounted.is_none());
}

// ---------------------------------------------------------------------------
// Ordered list
// ---------------------------------------------------------------------------

fn assert_boundary_controls(fx: &Fixture) {
    let rows = fx.rows("vehicle-entry");
    let n = rows.len();
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(is_disabled(row, RowAction::MoveUp), index == 0, "up at {index}");
        assert_eq!(
            is_disabled(row, RowAction::MoveDown),
            index + 1 == n,
            "down at {index}"
        );
    }
}

#[wasm_bindgen_test]
fn ordered_list_move_z_up_twice() {
    let fx = Fixture::new("ol-up", "x\ny\nz");
    let widget = OrderedListWidget::mount(&fx.document, ordered_config("ol-up"))
        .unwrap()
        .unwrap();
    assert_boundary_controls(&fx);

    let z = fx.rows("vehicle-entry").remove(2);
    control(&z, RowAction::MoveUp).click();
    assert_eq!(fx.values("vehicle-number"), vec!["x", "z", "y"]);
    assert_boundary_controls(&fx);

    control(&z, RowAction::MoveUp).click();
    assert_eq!(fx.values("vehicle-number"), vec!["z", "x", "y"]);
    assert_boundary_controls(&fx);

    assert_eq!(widget.flush_to_field(), "z\nx\ny");
    assert_eq!(fx.field.value(), "z\nx\ny");
}

#[wasm_bindgen_test]
fn ordered_list_move_down_lands_before_add_entry() {
    let fx = Fixture::new("ol-down", "a\nb");
    OrderedListWidget::mount(&fx.document, ordered_config("ol-down"))
        .unwrap()
        .unwrap();

    let a = fx.rows("vehicle-entry").remove(0);
    control(&a, RowAction::MoveDown).click();
    assert_eq!(fx.values("vehicle-number"), vec!["b", "a"]);
    assert_eq!(
        a.next_element_sibling().map(|next| next.class_name()),
        Some("add-vehicle".to_owned())
    );
    assert_boundary_controls(&fx);
}

#[wasm_bindgen_test]
fn ordered_list_single_row_disables_both_moves() {
    let fx = Fixture::new("ol-single", " 4711 \n\n");
    let widget = OrderedListWidget::mount(&fx.document, ordered_config("ol-single"))
        .unwrap()
        .unwrap();

    let only = fx.rows("vehicle-entry").remove(0);
    assert!(is_disabled(&only, RowAction::MoveUp));
    assert!(is_disabled(&only, RowAction::MoveDown));
    assert_eq!(widget.flush_to_field(), "4711");
}

#[wasm_bindgen_test]
fn ordered_list_add_and_remove_refresh_controls() {
    let fx = Fixture::new("ol-add", "a");
    let widget = OrderedListWidget::mount(&fx.document, ordered_config("ol-add"))
        .unwrap()
        .unwrap();

    fx.add_button("add-vehicle").click();
    assert_eq!(widget.row_count(), 2);
    assert_boundary_controls(&fx);

    let first = fx.rows("vehicle-entry").remove(0);
    control(&first, RowAction::Remove).click();
    assert_eq!(widget.row_count(), 1);
    assert_boundary_controls(&fx);
}

#[wasm_bindgen_test]
fn ordered_list_empty_field_flushes_empty_string() {
    let fx = Fixture::new("ol-empty", "");
    let widget = OrderedListWidget::mount(&fx.document, ordered_config("ol-empty"))
        .unwrap()
        .unwrap();

    assert_eq!(widget.row_count(), 0);
    assert_eq!(fx.rows("add-vehicle").len(), 1);
    assert_eq!(widget.flush_to_field(), "");
}

#[wasm_bindgen_test]
fn ordered_list_submit_event_keeps_moved_order() {
    let fx = Fixture::new("ol-submit", "x\ny\nz");
    OrderedListWidget::mount(&fx.document, ordered_config("ol-submit"))
        .unwrap()
        .unwrap();

    let x = fx.rows("vehicle-entry").remove(0);
    control(&x, RowAction::MoveDown).click();

    assert!(!fx.submit());
    assert_eq!(fx.field.value(), "y\nx\nz");
    assert!(fx.rows("vehicle-entry").is_empty());
    assert!(fx.submit());
}

#[wasm_bindgen_test]
fn ordered_list_rejects_dotted_value_class() {
    let fx = Fixture::new("ol-classes", "a");
    let mut config = ordered_config("ol-classes");
    config.classes.value = "vehicle.number".to_owned();

    assert!(matches!(
        OrderedListWidget::mount(&fx.document, config),
        Err(WebFormError::Form(FormError::Config(_)))
    ));
    assert!(fx.rows("add-vehicle").is_empty());
}
