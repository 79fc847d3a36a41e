use thiserror::Error;

use crate::types::Primitive;

/// Why binding a schema failed. Only the first failing field, in declaration
/// order, is ever reported.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum BindError {
    #[error("Missing environment variable: {key}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::missing_variable),
            help("set the variable, or give the field a default or an optional type")
        )
    )]
    MissingVariable { key: String },

    #[error("Invalid value for '{key}': '{value}' is not a valid {expected}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::invalid_value))
    )]
    InvalidValue {
        key: String,
        expected: Primitive,
        value: String,
    },

    #[error("Invalid default for field '{field}': {reason}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(envbind::invalid_default))
    )]
    InvalidDefault { field: String, reason: String },

    #[error("Bound configuration does not match the target type: {reason}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::deserialize),
            help("schema field names and types must match the struct's serde field names and types")
        )
    )]
    Deserialize { reason: String },
}

impl BindError {
    /// The environment key involved, when the error concerns one.
    pub fn key(&self) -> Option<&str> {
        match self {
            BindError::MissingVariable { key } | BindError::InvalidValue { key, .. } => Some(key),
            BindError::InvalidDefault { .. } | BindError::Deserialize { .. } => None,
        }
    }
}
