//! Transfer amount rules

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// A plain or scientific decimal literal with an optional sign.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("Invalid regex pattern")
});

/// Why an amount was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Nothing was entered.
    #[error("Amount is required")]
    Required,
    /// The input is not a number.
    #[error("Amount must be a number")]
    NotANumber,
    /// The number is zero or negative.
    #[error("Amount must be greater than 0")]
    NotPositive,
    /// The number is above the current limit.
    #[error("Amount exceeds current limit of {0}")]
    ExceedsLimit(Decimal),
}

/// A parsed amount.
///
/// Numbers a decimal can hold are kept exactly. Larger magnitudes and
/// non-zero values below decimal precision only keep their sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Exact(Decimal),
    /// Magnitude above `Decimal::MAX`.
    Overflow { negative: bool },
    /// Non-zero magnitude below the smallest decimal step.
    Underflow { negative: bool },
}

impl Amount {
    /// Returns `true` for numbers strictly above zero.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Exact(value) => *value > Decimal::ZERO,
            Self::Overflow { negative } | Self::Underflow { negative } => !negative,
        }
    }

    /// Returns `true` if the number is strictly above `limit`.
    pub fn exceeds(&self, limit: Decimal) -> bool {
        match self {
            Self::Exact(value) => *value > limit,
            Self::Overflow { negative } => !negative,
            Self::Underflow { negative } => {
                if *negative {
                    limit < Decimal::ZERO
                } else {
                    limit <= Decimal::ZERO
                }
            }
        }
    }
}

/// Parses a raw amount.
///
/// Surrounding whitespace is ignored. Plain decimals (`12.50`) and
/// scientific notation (`1e3`) are accepted; digit separators, `NaN` and
/// infinities are not.
pub fn parse_amount(raw: &str) -> Option<Amount> {
    let trimmed = raw.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return None;
    }

    // Only used for the sign and magnitude when the decimal is lossy.
    let approx = f64::from_str(trimmed).ok()?;
    let exact = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));

    let amount = match exact {
        Ok(value) if !value.is_zero() || approx == 0.0 => Amount::Exact(value),
        _ if approx == 0.0 => Amount::Exact(Decimal::ZERO),
        _ => match Decimal::try_from(approx) {
            Ok(value) if !value.is_zero() => Amount::Exact(value),
            _ if approx.abs() >= 1.0 => Amount::Overflow {
                negative: approx < 0.0,
            },
            _ => Amount::Underflow {
                negative: approx < 0.0,
            },
        },
    };
    Some(amount)
}

/// Validates a raw amount against the transfer limit.
///
/// Only the absence of input counts as missing: an explicit `0` is a number
/// and fails as non-positive. The limit is skipped unless it is positive.
pub fn validate_amount(value: &str, max_amount: Decimal) -> Result<(), AmountError> {
    if value.is_empty() {
        return Err(AmountError::Required);
    }

    let amount = parse_amount(value).ok_or(AmountError::NotANumber)?;

    if !amount.is_positive() {
        return Err(AmountError::NotPositive);
    }

    if max_amount > Decimal::ZERO && amount.exceeds(max_amount) {
        return Err(AmountError::ExceedsLimit(max_amount));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_required() {
        assert_eq!(validate_amount("", limit(1000)), Err(AmountError::Required));
    }

    #[test]
    fn test_explicit_zero_is_not_missing() {
        assert_eq!(validate_amount("0", limit(1000)), Err(AmountError::NotPositive));
        assert_eq!(validate_amount("0.00", limit(1000)), Err(AmountError::NotPositive));
    }

    #[test]
    fn test_not_a_number() {
        let inputs = [
            "abc", "12abc", "   ", "1,000", "1_000", "NaN", "Infinity", "inf", "1e", ".",
        ];
        for input in inputs {
            assert_eq!(
                validate_amount(input, limit(1000)),
                Err(AmountError::NotANumber),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_negative() {
        assert_eq!(validate_amount("-5", limit(1000)), Err(AmountError::NotPositive));
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert_eq!(validate_amount("1000", limit(1000)), Ok(()));
        assert_eq!(
            validate_amount("1000.01", limit(1000)),
            Err(AmountError::ExceedsLimit(limit(1000)))
        );
    }

    #[test]
    fn test_exceeds_message() {
        let err = validate_amount("700", limit(500)).unwrap_err();
        assert_eq!(err.to_string(), "Amount exceeds current limit of 500");
    }

    #[test]
    fn test_non_positive_limit_is_ignored() {
        assert_eq!(validate_amount("999999", Decimal::ZERO), Ok(()));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_amount(" 12.50 "), Some(Amount::Exact(Decimal::new(1250, 2))));
        assert_eq!(parse_amount("1e3"), Some(Amount::Exact(Decimal::new(1000, 0))));
        assert_eq!(parse_amount("+.5"), Some(Amount::Exact(Decimal::new(5, 1))));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1_000"), None);
    }

    #[test]
    fn test_parse_beyond_decimal_range() {
        assert_eq!(parse_amount("1e40"), Some(Amount::Overflow { negative: false }));
        assert_eq!(parse_amount("-1e40"), Some(Amount::Overflow { negative: true }));
        assert_eq!(
            parse_amount("100000000000000000000000000000"),
            Some(Amount::Overflow { negative: false })
        );
        assert_eq!(parse_amount("1e-30"), Some(Amount::Underflow { negative: false }));
        assert_eq!(
            parse_amount("0.000000000000000000000000000001"),
            Some(Amount::Underflow { negative: false })
        );
        assert_eq!(parse_amount("0e500"), Some(Amount::Exact(Decimal::ZERO)));
    }

    #[test]
    fn test_out_of_range_amounts_are_classified() {
        let max = limit(1000);
        let too_big = Err(AmountError::ExceedsLimit(max));
        assert_eq!(validate_amount("1e40", max), too_big);
        assert_eq!(validate_amount("100000000000000000000000000000", max), too_big);
        assert_eq!(validate_amount("-1e40", max), Err(AmountError::NotPositive));
        assert_eq!(validate_amount("-1e-30", max), Err(AmountError::NotPositive));
        assert_eq!(validate_amount("1e-30", max), Ok(()));
        assert_eq!(validate_amount("0.000000000000000000000000000001", max), Ok(()));
    }

    #[test]
    fn test_exceeds_iff_above_limit() {
        let max = limit(250);
        let inputs = [
            "1",
            "249.99",
            "250",
            "250.0001",
            "251",
            "10000",
            "1e40",
            "100000000000000000000000000000",
            "1e-30",
        ];
        for raw in inputs {
            let parsed = parse_amount(raw).unwrap();
            let exceeds = matches!(validate_amount(raw, max), Err(AmountError::ExceedsLimit(_)));
            assert_eq!(exceeds, parsed.exceeds(max), "{raw}");
            let above = raw.parse::<f64>().unwrap() > 250.0;
            assert_eq!(exceeds, above, "{raw}");
        }
    }
}
