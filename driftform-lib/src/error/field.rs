//! Field error types

use serde::Deserialize;
use serde::Serialize;

/// A per-field message reported by the remote endpoint.
///
/// `field` is kept as the literal name the endpoint sent; it is not
/// guaranteed to be one of the form's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFieldError {
    /// The field the endpoint attributes the error to.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

impl ServerFieldError {
    /// Creates a new server field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ServerFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A field name that is not part of the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownFieldError(pub String);
