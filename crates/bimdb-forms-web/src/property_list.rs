#![forbid(unsafe_code)]

//! DOM widget for the key/value property list.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bimdb_forms_core::{FormError, PropertyListConfig, PropertyListEditor, RowId};
use tracing::{debug, warn};
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, Node};

use crate::actions::RowAction;
use crate::dom::{self, ActionHit, BackingField};
use crate::error::WebFormError;

/// A mounted property-list editor.
///
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct PropertyListWidget {
    inner: Rc<RefCell<PropertyListView>>,
}

struct PropertyListView {
    config: PropertyListConfig,
    document: Document,
    field: BackingField,
    parent: Element,
    form: HtmlFormElement,
    add_entry: Element,
    editor: PropertyListEditor,
    rows: HashMap<RowId, Element>,
    /// Set once the rows have been written back; later submits pass through.
    flushed: bool,
}

impl PropertyListWidget {
    /// Mount the editor described by `config` into `document`.
    ///
    /// Returns `Ok(None)` when the page does not carry the backing field, its
    /// parent or its form. An invalid `config` or a backing value that is not
    /// a JSON object is an error and leaves the page untouched.
    pub fn mount(
        document: &Document,
        config: PropertyListConfig,
    ) -> Result<Option<Self>, WebFormError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(FormError::Config(errors).into());
        }
        let Some(anchors) = dom::locate(document, &config.backing_field_id) else {
            debug!(field = %config.backing_field_id, "property list not on this page");
            return Ok(None);
        };
        let editor = PropertyListEditor::from_backing(&anchors.field.value())?;

        let add_entry = dom::div(document, &config.classes.add)?;
        anchors.parent.append_child(&add_entry)?;

        let mut view = PropertyListView {
            config,
            document: document.clone(),
            field: anchors.field,
            parent: anchors.parent,
            form: anchors.form,
            add_entry,
            editor,
            rows: HashMap::new(),
            flushed: false,
        };
        let initial: Vec<(RowId, String, String)> = view
            .editor
            .rows()
            .map(|(id, row)| (id, row.key.clone(), row.value.clone()))
            .collect();
        for (id, key, value) in initial {
            view.render_row(id, &key, &value)?;
        }

        let plus = dom::action_button(document, RowAction::Add, &view.config.labels.add, None)?;
        view.add_entry.append_child(&plus)?;
        view.field.hide()?;

        let widget = Self {
            inner: Rc::new(RefCell::new(view)),
        };
        widget.install_listeners()?;

        let view = widget.inner.borrow();
        if let Some(focus_id) = &view.config.focus_field_id {
            dom::focus_by_id(document, focus_id)?;
        }
        debug!(
            field = %view.config.backing_field_id,
            rows = view.editor.len(),
            "property list mounted"
        );
        drop(view);
        Ok(Some(widget))
    }

    /// Number of rows currently rendered.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.inner.borrow().editor.len()
    }

    /// Serialize the rendered rows into the backing field and detach them.
    ///
    /// This is the submit interception minus the final `form.submit()`.
    /// Runs once; later calls return the value already written.
    pub fn flush_to_field(&self) -> String {
        self.inner.borrow_mut().flush_to_field()
    }

    fn install_listeners(&self) -> Result<(), WebFormError> {
        let (parent, form) = {
            let view = self.inner.borrow();
            (view.parent.clone(), view.form.clone())
        };

        let clicks = Rc::clone(&self.inner);
        dom::listen(&parent, "click", move |event: Event| {
            let Ok(mut view) = clicks.try_borrow_mut() else {
                warn!("property list busy; click ignored");
                return;
            };
            if let Err(err) = view.handle_click(&event) {
                warn!(error = %err, "property list click failed");
            }
        })?;

        let submits = Rc::clone(&self.inner);
        dom::listen(&form, "submit", move |event: Event| {
            let Ok(mut view) = submits.try_borrow_mut() else {
                event.prevent_default();
                dom::report_failure("property list submit", &"editor busy; submit dropped");
                return;
            };
            if view.flushed {
                return;
            }
            event.prevent_default();
            view.flush_to_field();
            if let Err(err) = view.resubmit() {
                dom::report_failure("property list resubmit", &err);
            }
        })?;
        Ok(())
    }
}

impl PropertyListView {
    fn render_row(
        &mut self,
        id: RowId,
        key: &str,
        value: &str,
    ) -> Result<HtmlInputElement, WebFormError> {
        let classes = &self.config.classes;
        let container = dom::row_container(&self.document, &classes.row, id)?;
        let key_input = dom::text_input(&self.document, &classes.key, key)?;
        let value_input = dom::text_input(&self.document, &classes.value, value)?;
        let minus = dom::action_button(
            &self.document,
            RowAction::Remove,
            &self.config.labels.remove,
            None,
        )?;
        container.append_child(&key_input)?;
        container.append_child(&value_input)?;
        container.append_child(&minus)?;
        let anchor: &Node = &self.add_entry;
        self.parent.insert_before(&container, Some(anchor))?;
        self.rows.insert(id, container);
        Ok(key_input)
    }

    fn handle_click(&mut self, event: &Event) -> Result<(), WebFormError> {
        let Some(hit) = dom::action_hit(event)? else {
            return Ok(());
        };
        match hit.action {
            RowAction::Add if self.owns_add_control(&hit) => {
                let id = self.editor.add_row();
                let key_input = self.render_row(id, "", "")?;
                key_input.focus()?;
            }
            RowAction::Remove => {
                if let Some(id) = self.owned_row(&hit) {
                    self.editor.remove_row(id);
                    if let Some(container) = self.rows.remove(&id) {
                        container.remove();
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn owns_add_control(&self, hit: &ActionHit) -> bool {
        let control: &Node = &hit.control;
        self.add_entry.contains(Some(control))
    }

    /// Row id of a hit, if the row belongs to this widget.
    fn owned_row(&self, hit: &ActionHit) -> Option<RowId> {
        let (id, element) = hit.row.as_ref()?;
        (self.rows.get(id) == Some(element)).then_some(*id)
    }

    fn flush_to_field(&mut self) -> String {
        if self.flushed {
            return self.field.value();
        }
        let classes = &self.config.classes;
        // Read every row before the model or the page changes.
        let read: Vec<(RowId, Option<(String, String)>)> = self
            .editor
            .ids()
            .map(|id| {
                let inputs = self.rows.get(&id).and_then(|row| {
                    let key = dom::child_input(row, &classes.key)?;
                    let value = dom::child_input(row, &classes.value)?;
                    Some((key.value(), value.value()))
                });
                (id, inputs)
            })
            .collect();

        for (id, inputs) in read {
            match inputs {
                Some((key, value)) => {
                    self.editor.set_key(id, key);
                    self.editor.set_value(id, value);
                }
                None => {
                    warn!(row = %id, "row has no key or value input; dropped");
                    self.editor.remove_row(id);
                }
            }
        }

        let serialized = self.editor.submit();
        self.field.set_value(&serialized);
        for (_, container) in self.rows.drain() {
            container.remove();
        }
        self.flushed = true;
        debug!(
            field = %self.config.backing_field_id,
            bytes = serialized.len(),
            "property list written to backing field"
        );
        serialized
    }

    fn resubmit(&self) -> Result<(), WebFormError> {
        self.form.submit()?;
        Ok(())
    }
}
