#![forbid(unsafe_code)]

//! DOM widget for the orderable list.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bimdb_forms_core::{
    FormError, MoveDirection, OrderedListConfig, OrderedListEditor, Placement, RowId,
};
use tracing::{debug, trace, warn};
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, Node};

use crate::actions::RowAction;
use crate::dom::{self, ActionHit, BackingField};
use crate::error::WebFormError;

/// A mounted ordered-list editor.
///
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct OrderedListWidget {
    inner: Rc<RefCell<OrderedListView>>,
}

struct RenderedRow {
    container: Element,
    up: HtmlInputElement,
    down: HtmlInputElement,
}

struct OrderedListView {
    config: OrderedListConfig,
    document: Document,
    field: BackingField,
    parent: Element,
    form: HtmlFormElement,
    add_entry: Element,
    editor: OrderedListEditor,
    rows: HashMap<RowId, RenderedRow>,
    /// Set once the rows have been written back; later submits pass through.
    flushed: bool,
}

impl OrderedListWidget {
    /// Mount the editor described by `config` into `document`.
    ///
    /// Returns `Ok(None)` when the page does not carry the backing field, its
    /// parent or its form. An invalid `config` is an error and leaves the
    /// page untouched.
    pub fn mount(
        document: &Document,
        config: OrderedListConfig,
    ) -> Result<Option<Self>, WebFormError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(FormError::Config(errors).into());
        }
        let Some(anchors) = dom::locate(document, &config.backing_field_id) else {
            debug!(field = %config.backing_field_id, "ordered list not on this page");
            return Ok(None);
        };
        let editor = OrderedListEditor::from_backing(&anchors.field.value());

        let add_entry = dom::div(document, &config.classes.add)?;
        anchors.parent.append_child(&add_entry)?;

        let mut view = OrderedListView {
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
        let initial: Vec<(RowId, String)> = view
            .editor
            .ids()
            .zip(view.editor.values())
            .map(|(id, value)| (id, value.to_owned()))
            .collect();
        for (id, value) in initial {
            view.render_row(id, &value)?;
        }
        view.refresh_controls();

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
            "ordered list mounted"
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
                warn!("ordered list busy; click ignored");
                return;
            };
            if let Err(err) = view.handle_click(&event) {
                warn!(error = %err, "ordered list click failed");
            }
        })?;

        let submits = Rc::clone(&self.inner);
        dom::listen(&form, "submit", move |event: Event| {
            let Ok(mut view) = submits.try_borrow_mut() else {
                event.prevent_default();
                dom::report_failure("ordered list submit", &"editor busy; submit dropped");
                return;
            };
            if view.flushed {
                return;
            }
            event.prevent_default();
            view.flush_to_field();
            if let Err(err) = view.resubmit() {
                dom::report_failure("ordered list resubmit", &err);
            }
        })?;
        Ok(())
    }
}

impl OrderedListView {
    fn render_row(&mut self, id: RowId, value: &str) -> Result<HtmlInputElement, WebFormError> {
        let classes = &self.config.classes;
        let labels = &self.config.labels;
        let container = dom::row_container(&self.document, &classes.row, id)?;
        let input = dom::text_input(&self.document, &classes.value, value)?;
        let minus = dom::action_button(&self.document, RowAction::Remove, &labels.remove, None)?;
        let up = dom::action_button(
            &self.document,
            RowAction::MoveUp,
            &labels.up,
            Some(classes.up.as_str()),
        )?;
        let down = dom::action_button(
            &self.document,
            RowAction::MoveDown,
            &labels.down,
            Some(classes.down.as_str()),
        )?;
        container.append_child(&input)?;
        container.append_child(&minus)?;
        container.append_child(&up)?;
        container.append_child(&down)?;
        let anchor: &Node = &self.add_entry;
        self.parent.insert_before(&container, Some(anchor))?;
        self.rows.insert(
            id,
            RenderedRow {
                container,
                up,
                down,
            },
        );
        Ok(input)
    }

    /// Re-apply first/last disabled state to every row's move buttons.
    fn refresh_controls(&self) {
        for (id, state) in self.editor.controls() {
            if let Some(row) = self.rows.get(&id) {
                row.up.set_disabled(state.up_disabled);
                row.down.set_disabled(state.down_disabled);
            }
        }
    }

    fn handle_click(&mut self, event: &Event) -> Result<(), WebFormError> {
        let Some(hit) = dom::action_hit(event)? else {
            return Ok(());
        };
        match hit.action {
            RowAction::Add if self.owns_add_control(&hit) => {
                let id = self.editor.add_row();
                let input = self.render_row(id, "")?;
                self.refresh_controls();
                input.focus()?;
            }
            RowAction::Remove => {
                if let Some(id) = self.owned_row(&hit) {
                    self.editor.remove_row(id);
                    if let Some(row) = self.rows.remove(&id) {
                        row.container.remove();
                    }
                    self.refresh_controls();
                }
            }
            RowAction::MoveUp | RowAction::MoveDown => {
                let Some(id) = self.owned_row(&hit) else {
                    return Ok(());
                };
                let moved = match hit.action.direction() {
                    Some(MoveDirection::Up) => self.editor.move_up(id),
                    Some(MoveDirection::Down) => self.editor.move_down(id),
                    None => None,
                };
                if moved.is_some() {
                    self.reposition(id)?;
                    self.refresh_controls();
                }
            }
            RowAction::Add => {}
        }
        Ok(())
    }

    /// Move a row's element to match its position in the editor.
    fn reposition(&self, id: RowId) -> Result<(), WebFormError> {
        let (Some(row), Some(placement)) = (self.rows.get(&id), self.editor.placement(id)) else {
            return Ok(());
        };
        let anchor: &Node = match placement {
            Placement::BeforeRow(next) => match self.rows.get(&next) {
                Some(next_row) => &next_row.container,
                None => &self.add_entry,
            },
            Placement::BeforeAdd => &self.add_entry,
        };
        self.parent.insert_before(&row.container, Some(anchor))?;
        trace!(row = %id, ?placement, "list row repositioned");
        Ok(())
    }

    fn owns_add_control(&self, hit: &ActionHit) -> bool {
        let control: &Node = &hit.control;
        self.add_entry.contains(Some(control))
    }

    /// Row id of a hit, if the row belongs to this widget.
    fn owned_row(&self, hit: &ActionHit) -> Option<RowId> {
        let (id, element) = hit.row.as_ref()?;
        let row = self.rows.get(id)?;
        (&row.container == element).then_some(*id)
    }

    fn flush_to_field(&mut self) -> String {
        if self.flushed {
            return self.field.value();
        }
        let value_class = &self.config.classes.value;
        // Read every row before the model or the page changes.
        let read: Vec<(RowId, Option<String>)> = self
            .editor
            .ids()
            .map(|id| {
                let value = self
                    .rows
                    .get(&id)
                    .and_then(|row| dom::child_input(&row.container, value_class))
                    .map(|input| input.value());
                (id, value)
            })
            .collect();

        for (id, value) in read {
            match value {
                Some(value) => {
                    self.editor.set_value(id, value);
                }
                None => {
                    warn!(row = %id, "row has no value input; dropped");
                    self.editor.remove_row(id);
                }
            }
        }

        let serialized = self.editor.submit();
        self.field.set_value(&serialized);
        for (_, row) in self.rows.drain() {
            row.container.remove();
        }
        self.flushed = true;
        debug!(
            field = %self.config.backing_field_id,
            bytes = serialized.len(),
            "ordered list written to backing field"
        );
        serialized
    }

    fn resubmit(&self) -> Result<(), WebFormError> {
        self.form.submit()?;
        Ok(())
    }
}
