//! Rule set error types

use rust_decimal::Decimal;

/// Errors raised when building a rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The transfer limit must be strictly positive.
    #[error("maximum amount must be positive, got {0}")]
    NonPositiveLimit(Decimal),
}
