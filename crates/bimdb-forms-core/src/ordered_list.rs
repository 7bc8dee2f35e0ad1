#![forbid(unsafe_code)]

//! Orderable single-value list editor model.
//!
//! Every structural change (add, remove, move) leaves the list in a state
//! where [`OrderedListEditor::controls`] reports the first row's "up" and the
//! last row's "down" as disabled; bindings re-apply that state after each
//! call.

use tracing::{debug, trace};

use crate::codec::{decode_list, encode_list};
use crate::rows::{MoveControls, MoveDirection, Placement, RowId, RowList, RowMove};

/// Editor state for an ordered list of identifiers.
#[derive(Debug, Clone, Default)]
pub struct OrderedListEditor {
    rows: RowList<String>,
}

impl OrderedListEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editor from a newline-joined backing value.
    ///
    /// Entries are trimmed and blank lines skipped.
    #[must_use]
    pub fn from_backing(raw: &str) -> Self {
        let mut editor = Self::new();
        for value in decode_list(raw) {
            editor.push(value);
        }
        debug!(rows = editor.len(), "ordered list parsed");
        editor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row (the "add" action).
    pub fn add_row(&mut self) -> RowId {
        self.push(String::new())
    }

    /// Append a pre-filled row.
    pub fn push(&mut self, value: impl Into<String>) -> RowId {
        let id = self.rows.push(value.into());
        trace!(row = %id, "list row added");
        id
    }

    pub fn remove_row(&mut self, id: RowId) -> Option<String> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            trace!(row = %id, remaining = self.rows.len(), "list row removed");
        }
        removed
    }

    /// Swap a row with its predecessor. `None` when already first.
    pub fn move_up(&mut self, id: RowId) -> Option<RowMove> {
        self.shift(id, MoveDirection::Up)
    }

    /// Swap a row with its successor. `None` when already last.
    pub fn move_down(&mut self, id: RowId) -> Option<RowMove> {
        self.shift(id, MoveDirection::Down)
    }

    fn shift(&mut self, id: RowId, direction: MoveDirection) -> Option<RowMove> {
        let moved = self.rows.shift(id, direction);
        match moved {
            Some(RowMove { from, to, .. }) => trace!(row = %id, from, to, "list row moved"),
            None => trace!(row = %id, ?direction, "list row move ignored"),
        }
        moved
    }

    #[must_use]
    pub fn value(&self, id: RowId) -> Option<&str> {
        self.rows.get(id).map(String::as_str)
    }

    /// Replace a row's value. Returns `false` for an unknown row.
    pub fn set_value(&mut self, id: RowId, value: impl Into<String>) -> bool {
        match self.rows.get_mut(id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Values in display order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|(_, value)| value.as_str())
    }

    /// Row ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.ids()
    }

    #[must_use]
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.index_of(id)
    }

    #[must_use]
    pub fn placement(&self, id: RowId) -> Option<Placement> {
        self.rows.placement(id)
    }

    /// Up/down enable state for every row, in order.
    #[must_use]
    pub fn controls(&self) -> Vec<(RowId, MoveControls)> {
        self.rows.controls()
    }

    /// Current rows as the text the backing field would receive.
    #[must_use]
    pub fn serialize(&self) -> String {
        encode_list(self.values())
    }

    /// Serialize for submission and tear every row down.
    pub fn submit(&mut self) -> String {
        let serialized = self.serialize();
        let dropped = self.rows.drain().count();
        debug!(rows = dropped, bytes = serialized.len(), "ordered list submitted");
        serialized
    }
}
