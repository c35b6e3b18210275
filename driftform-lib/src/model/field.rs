//! Form fields

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::UnknownFieldError;

/// A field of the transfer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Recipient email address.
    Email,
    /// Transfer amount.
    Amount,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 2] = [Field::Email, Field::Amount];

    /// Returns the wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Amount => "amount",
        }
    }

    /// Returns the human-readable label of the field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email Address",
            Self::Amount => "Transfer Amount ($)",
        }
    }
}

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "amount" => Ok(Self::Amount),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
