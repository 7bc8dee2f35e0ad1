#![forbid(unsafe_code)]

//! Key/value property editor model.
//!
//! Holds the rows of a property list between setup and submit. The backing
//! field is read once by [`PropertyListEditor::from_backing`] and written
//! once by [`PropertyListEditor::submit`]; edits in between only touch the
//! rows.

use tracing::{debug, trace};

use crate::codec::{decode_properties, encode_properties};
use crate::error::FormError;
use crate::rows::{RowId, RowList};

/// One key/value pair as shown in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
}

impl PropertyRow {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Editor state for a free-form property list.
#[derive(Debug, Clone, Default)]
pub struct PropertyListEditor {
    rows: RowList<PropertyRow>,
}

impl PropertyListEditor {
    /// Create an editor with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editor from the backing field's JSON object, one row per key
    /// in document order.
    pub fn from_backing(raw: &str) -> Result<Self, FormError> {
        let mut editor = Self::new();
        for (key, value) in decode_properties(raw)? {
            editor.push(key, value);
        }
        debug!(rows = editor.len(), "property list parsed");
        Ok(editor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row (the "add new entry" action).
    pub fn add_row(&mut self) -> RowId {
        self.push(String::new(), String::new())
    }

    /// Append a pre-filled row.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> RowId {
        let id = self.rows.push(PropertyRow::new(key, value));
        trace!(row = %id, "property row added");
        id
    }

    /// Drop a row. The backing field is untouched until submit.
    pub fn remove_row(&mut self, id: RowId) -> Option<PropertyRow> {
        let removed = self.rows.remove(id);
        if removed.is_some() {
            trace!(row = %id, remaining = self.rows.len(), "property row removed");
        }
        removed
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&PropertyRow> {
        self.rows.get(id)
    }

    /// Replace a row's key. Returns `false` for an unknown row.
    pub fn set_key(&mut self, id: RowId, key: impl Into<String>) -> bool {
        match self.rows.get_mut(id) {
            Some(row) => {
                row.key = key.into();
                true
            }
            None => false,
        }
    }

    /// Replace a row's value. Returns `false` for an unknown row.
    pub fn set_value(&mut self, id: RowId, value: impl Into<String>) -> bool {
        match self.rows.get_mut(id) {
            Some(row) => {
                row.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &PropertyRow)> + '_ {
        self.rows.iter()
    }

    /// Row ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.ids()
    }

    /// Current rows as the JSON text the backing field would receive.
    #[must_use]
    pub fn serialize(&self) -> String {
        encode_properties(
            self.rows
                .iter()
                .map(|(_, row)| (row.key.as_str(), row.value.as_str())),
        )
    }

    /// Serialize for submission and tear every row down.
    ///
    /// Returns the new backing-field value; the editor is empty afterwards.
    pub fn submit(&mut self) -> String {
        let serialized = self.serialize();
        let dropped = self.rows.drain().count();
        debug!(rows = dropped, bytes = serialized.len(), "property list submitted");
        serialized
    }
}
