#![forbid(unsafe_code)]

//! Page-integration configuration for both editors.
//!
//! Every field defaults to the identifiers the bimdb templates render, so
//! `FormsConfig::default()` wires the stock add/edit and coupling add/edit
//! pages. Hosts embedding the editors elsewhere may override any subset:
//!
//! ```rust
//! use bimdb_forms_core::config::OrderedListConfig;
//!
//! let config = OrderedListConfig::from_json_str(r#"{"backing_field_id":"route-stops"}"#)?;
//! assert_eq!(config.backing_field_id, "route-stops");
//! assert_eq!(config.classes.row, "vehicle-entry");
//! # Ok::<(), bimdb_forms_core::FormError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FormError;

// ---------------------------------------------------------------------------
// Top-level FormsConfig
// ---------------------------------------------------------------------------

/// Configuration for both editors of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    pub property_list: PropertyListConfig,
    pub ordered_list: OrderedListConfig,
}

impl FormsConfig {
    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(s).map_err(FormError::ConfigJson)?;
        let errors = config.validate();
        validated(config, errors)
    }

    /// Validate both sections. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.property_list.validate();
        errors.extend(self.ordered_list.validate());
        errors
    }
}

// ---------------------------------------------------------------------------
// Button labels
// ---------------------------------------------------------------------------

/// Captions of the generated control buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub add: String,
    pub remove: String,
    pub up: String,
    pub down: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            add: "+".to_owned(),
            remove: "\u{2212}".to_owned(),
            up: "\u{2191}".to_owned(),
            down: "\u{2193}".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Property list
// ---------------------------------------------------------------------------

/// Class names used by the property-list markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyListClasses {
    pub row: String,
    pub add: String,
    pub key: String,
    pub value: String,
}

impl Default for PropertyListClasses {
    fn default() -> Self {
        Self {
            row: "other-data-entry".to_owned(),
            add: "add-other-data-entry".to_owned(),
            key: "key".to_owned(),
            value: "value".to_owned(),
        }
    }
}

/// Wiring of the key/value editor on the vehicle add/edit page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyListConfig {
    /// Id of the text field holding the JSON object.
    pub backing_field_id: String,
    /// Field focused once setup completes, if present on the page.
    pub focus_field_id: Option<String>,
    pub classes: PropertyListClasses,
    pub labels: ButtonLabels,
}

impl Default for PropertyListConfig {
    fn default() -> Self {
        Self {
            backing_field_id: "bimdb-ae-other-data".to_owned(),
            focus_field_id: Some("bimdb-ae-company".to_owned()),
            classes: PropertyListClasses::default(),
            labels: ButtonLabels::default(),
        }
    }
}

impl PropertyListConfig {
    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(s).map_err(FormError::ConfigJson)?;
        let errors = config.validate();
        validated(config, errors)
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_id(&mut errors, "property_list.backing_field_id", &self.backing_field_id);
        if let Some(focus) = &self.focus_field_id {
            check_id(&mut errors, "property_list.focus_field_id", focus);
        }
        check_class(&mut errors, "property_list.classes.row", &self.classes.row);
        check_class(&mut errors, "property_list.classes.add", &self.classes.add);
        check_class(&mut errors, "property_list.classes.key", &self.classes.key);
        check_class(&mut errors, "property_list.classes.value", &self.classes.value);
        if self.classes.key == self.classes.value {
            errors.push(format!(
                "property_list.classes.key and property_list.classes.value must differ (both {:?})",
                self.classes.key
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Ordered list
// ---------------------------------------------------------------------------

/// Class names used by the ordered-list markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderedListClasses {
    pub row: String,
    pub add: String,
    pub value: String,
    pub up: String,
    pub down: String,
}

impl Default for OrderedListClasses {
    fn default() -> Self {
        Self {
            row: "vehicle-entry".to_owned(),
            add: "add-vehicle".to_owned(),
            value: "vehicle-number".to_owned(),
            up: "up-button".to_owned(),
            down: "down-button".to_owned(),
        }
    }
}

/// Wiring of the orderable vehicle list on the coupling add/edit page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderedListConfig {
    /// Id of the text field holding the newline-joined list.
    pub backing_field_id: String,
    /// Field focused once setup completes, if present on the page.
    pub focus_field_id: Option<String>,
    pub classes: OrderedListClasses,
    pub labels: ButtonLabels,
}

impl Default for OrderedListConfig {
    fn default() -> Self {
        Self {
            backing_field_id: "bimdb-cae-vehicles".to_owned(),
            focus_field_id: Some("bimdb-cae-company".to_owned()),
            classes: OrderedListClasses::default(),
            labels: ButtonLabels::default(),
        }
    }
}

impl OrderedListConfig {
    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(s).map_err(FormError::ConfigJson)?;
        let errors = config.validate();
        validated(config, errors)
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_id(&mut errors, "ordered_list.backing_field_id", &self.backing_field_id);
        if let Some(focus) = &self.focus_field_id {
            check_id(&mut errors, "ordered_list.focus_field_id", focus);
        }
        check_class(&mut errors, "ordered_list.classes.row", &self.classes.row);
        check_class(&mut errors, "ordered_list.classes.add", &self.classes.add);
        check_class(&mut errors, "ordered_list.classes.value", &self.classes.value);
        check_class(&mut errors, "ordered_list.classes.up", &self.classes.up);
        check_class(&mut errors, "ordered_list.classes.down", &self.classes.down);
        errors
    }
}

fn validated<T>(config: T, errors: Vec<String>) -> Result<T, FormError> {
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(FormError::Config(errors))
    }
}

fn check_id(errors: &mut Vec<String>, name: &str, id: &str) {
    if id.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn check_class(errors: &mut Vec<String>, name: &str, class: &str) {
    if class.is_empty() {
        errors.push(format!("{name} must not be empty"));
    } else if !is_class_name(class) {
        errors.push(format!("{name} must be a plain CSS class name, got {class:?}"));
    }
}

/// Unescaped CSS identifier: an optional `-`, then a letter, `_` or `-`,
/// then letters, digits, `_` or `-`. Non-ASCII counts as a letter.
fn is_class_name(class: &str) -> bool {
    fn name_start(c: char) -> bool {
        c == '_' || c.is_ascii_alphabetic() || !c.is_ascii()
    }
    fn name_char(c: char) -> bool {
        name_start(c) || c == '-' || c.is_ascii_digit()
    }

    let mut chars = class.chars().peekable();
    if chars.peek() == Some(&'-') {
        chars.next();
    }
    match chars.next() {
        Some(c) if name_start(c) || c == '-' => chars.all(name_char),
        _ => false,
    }
}
