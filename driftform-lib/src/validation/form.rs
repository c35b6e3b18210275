//! Whole-form validation

use crate::model::ClientErrors;
use crate::model::Field;
use crate::model::FormValues;
use crate::model::RuleSet;

use super::AmountError;
use super::EmailError;
use super::validate_amount;
use super::validate_email;

/// A validation failure on any form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldIssue {
    /// The email field failed.
    #[error(transparent)]
    Email(#[from] EmailError),
    /// The amount field failed.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Validates a single field against the rules.
pub fn validate_field(
    field: Field,
    values: &FormValues,
    rules: &RuleSet,
) -> Result<(), FieldIssue> {
    match field {
        Field::Email => validate_email(&values.email, rules.blocked_domains())?,
        Field::Amount => validate_amount(&values.amount, rules.max_amount())?,
    }
    Ok(())
}

/// Validates every field, collecting one message per invalid field.
pub fn validate_form(values: &FormValues, rules: &RuleSet) -> ClientErrors {
    let mut errors = ClientErrors::new();
    for field in Field::ALL {
        if let Err(issue) = validate_field(field, values, rules) {
            errors.insert(field, issue.to_string());
        }
    }
    errors
}
