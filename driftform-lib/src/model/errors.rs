//! Client and server error maps

use std::collections::BTreeMap;

use super::Field;
use crate::error::ServerFieldError;

/// Reserved server error key for failures not attributed to any field.
pub const FORM_KEY: &str = "form";

/// Errors computed locally from the current values and rules.
///
/// Fields without an entry are valid. The map is always rebuilt from
/// scratch, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientErrors(BTreeMap<Field, String>);

impl ClientErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns the error for a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns `true` if the field has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns `true` if every field is valid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Errors asserted by the remote endpoint after a submission.
///
/// Holds per-field messages, an optional form-level banner for failures
/// that belong to no field, and any entries the endpoint attributed to
/// field names the form does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors {
    fields: BTreeMap<Field, String>,
    form: Option<String>,
    unattributed: BTreeMap<String, String>,
}

impl ServerErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh map from an endpoint's error list.
    ///
    /// Later entries for the same field override earlier ones. An entry
    /// named `form` becomes the banner message.
    pub fn from_response(errors: &[ServerFieldError]) -> Self {
        let mut map = Self::new();
        for error in errors {
            if error.field == FORM_KEY {
                map.form = Some(error.message.clone());
                continue;
            }
            match error.field.parse::<Field>() {
                Ok(field) => {
                    map.fields.insert(field, error.message.clone());
                }
                Err(_) => {
                    log::warn!("server reported error for unknown field {:?}", error.field);
                    map.unattributed
                        .insert(error.field.clone(), error.message.clone());
                }
            }
        }
        map
    }

    /// Builds a map holding only a form-level banner message.
    pub fn form_only(message: impl Into<String>) -> Self {
        Self {
            form: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns the error for a field, if any.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Returns the form-level banner message, if any.
    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    /// Iterates over entries for field names the form does not know.
    pub fn unattributed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.unattributed
            .iter()
            .map(|(name, msg)| (name.as_str(), msg.as_str()))
    }

    /// Drops the error for a field. Returns `true` if one was present.
    pub fn clear_field(&mut self, field: Field) -> bool {
        self.fields.remove(&field).is_some()
    }

    /// Returns `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none() && self.unattributed.is_empty()
    }
}
