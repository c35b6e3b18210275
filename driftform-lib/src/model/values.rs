//! Raw form input

use serde::Deserialize;
use serde::Serialize;

use super::Field;

/// The raw, unparsed text of every form field.
///
/// Serializes to the payload sent to the submit endpoint:
/// `{"email": "...", "amount": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Raw email input.
    pub email: String,
    /// Raw amount input.
    pub amount: String,
}

impl FormValues {
    /// Creates a new set of values.
    pub fn new(email: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            amount: amount.into(),
        }
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Amount => &self.amount,
        }
    }

    /// Replaces the raw value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.email = value,
            Field::Amount => self.amount = value,
        }
    }

    /// Returns `true` if no field has any input at all.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}
