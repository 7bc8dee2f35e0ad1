#![forbid(unsafe_code)]

//! Error type shared by the codecs, the configuration layer and both editors.

use thiserror::Error;

/// Failures surfaced while turning a backing field or a configuration into
/// an editor.
///
/// Missing page elements are not errors: an absent widget is a silent no-op
/// handled by the binding layer before any of these can occur.
#[derive(Debug, Error)]
pub enum FormError {
    /// The backing field of a property list does not contain valid JSON.
    #[error("backing field is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The backing field parsed, but the top-level value is not an object.
    #[error("backing field does not contain a JSON object (found {found})")]
    NotAnObject { found: &'static str },

    /// A configuration override did not parse.
    #[error("failed to parse editor configuration: {0}")]
    ConfigJson(#[source] serde_json::Error),

    /// A configuration parsed but failed validation.
    #[error("editor configuration is invalid: {}", .0.join("; "))]
    Config(Vec<String>),
}

impl FormError {
    /// Short stable label for the kind of failure, used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "invalid_json",
            Self::NotAnObject { .. } => "not_an_object",
            Self::ConfigJson(_) => "config_json",
            Self::Config(_) => "config",
        }
    }
}
