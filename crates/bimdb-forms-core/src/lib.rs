#![forbid(unsafe_code)]

//! `bimdb-forms-core` holds the host-independent half of the bimdb form
//! editors.
//!
//! Two editors turn a single serialized form field into editable rows and
//! back again:
//! - [`PropertyListEditor`]: key/value pairs stored as a JSON object.
//! - [`OrderedListEditor`]: an orderable list stored as newline-joined text.
//!
//! Row order is owned by an explicit [`RowList`]; a presentation layer
//! (see `bimdb-forms-web`) mirrors it and routes user actions back in by
//! [`RowId`]. Nothing here touches JS or the DOM, so the whole lifecycle of
//! setup, editing and submit runs in native tests.

pub mod codec;
pub mod config;
pub mod error;
pub mod ordered_list;
pub mod property_list;
pub mod rows;

pub use config::{FormsConfig, OrderedListConfig, PropertyListConfig};
pub use error::FormError;
pub use ordered_list::OrderedListEditor;
pub use property_list::{PropertyListEditor, PropertyRow};
pub use rows::{MoveControls, MoveDirection, Placement, RowId, RowList, RowMove};
