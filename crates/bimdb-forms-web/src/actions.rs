#![forbid(unsafe_code)]

//! Markup contract between rendered rows and the delegated click handler.
//!
//! Control buttons carry their action in [`ACTION_ATTR`]; row containers
//! carry their model handle in [`ROW_ID_ATTR`]. One click listener on the
//! editor's parent element resolves both, so detached rows hold no
//! callbacks of their own.

use bimdb_forms_core::{MoveDirection, RowId};

/// Attribute naming the action of a generated control button.
pub const ACTION_ATTR: &str = "data-row-action";

/// Attribute carrying the [`RowId`] of a rendered row container.
pub const ROW_ID_ATTR: &str = "data-row-id";

/// User action bound to a generated control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Add,
    Remove,
    MoveUp,
    MoveDown,
}

impl RowAction {
    /// Value rendered into [`ACTION_ATTR`].
    #[must_use]
    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::MoveUp => "up",
            Self::MoveDown => "down",
        }
    }

    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "up" => Some(Self::MoveUp),
            "down" => Some(Self::MoveDown),
            _ => None,
        }
    }

    /// Reorder direction, for the two move actions.
    #[must_use]
    pub const fn direction(self) -> Option<MoveDirection> {
        match self {
            Self::MoveUp => Some(MoveDirection::Up),
            Self::MoveDown => Some(MoveDirection::Down),
            Self::Add | Self::Remove => None,
        }
    }
}

/// Parse the [`ROW_ID_ATTR`] value of a row container.
#[must_use]
pub fn parse_row_id(value: Option<&str>) -> Option<RowId> {
    value?.parse().ok()
}

/// Selector matching any element that carries `attr`.
#[must_use]
pub fn attr_selector(attr: &str) -> String {
    format!("[{attr}]")
}
