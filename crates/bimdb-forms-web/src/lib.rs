#![forbid(unsafe_code)]

//! Browser binding for the bimdb form editors.
//!
//! On `wasm32` this crate mounts [`bimdb_forms_core`] editors into a page and
//! exports the setup entry points to JS:
//! - `setUpAddEdit`, `doSetUpAddEdit`, `setUpAddEditWith` for the property
//!   list.
//! - `setUpCouplingAddEdit`, `doSetUpCouplingAddEdit`,
//!   `setUpCouplingAddEditWith` for the ordered list.
//!
//! The markup contract in [`actions`] and the error type compile everywhere,
//! so they are covered by native tests.

pub mod actions;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod ordered_list;
#[cfg(target_arch = "wasm32")]
mod property_list;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::WebFormError;

#[cfg(target_arch = "wasm32")]
pub use ordered_list::OrderedListWidget;
#[cfg(target_arch = "wasm32")]
pub use property_list::PropertyListWidget;
#[cfg(target_arch = "wasm32")]
pub use wasm::{
    do_set_up_add_edit, do_set_up_coupling_add_edit, set_up_add_edit, set_up_add_edit_with,
    set_up_coupling_add_edit, set_up_coupling_add_edit_with,
};
