//! Validation rule snapshots

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::error::RuleError;

/// An immutable snapshot of the validation rules in force.
///
/// Rule sets are replaced wholesale whenever the rule source publishes a new
/// one; nothing mutates a snapshot in place.
///
/// # Example
///
/// ```
/// use driftform_lib::model::RuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = RuleSet::new(Decimal::new(500, 0), ["scam.com"]).unwrap();
/// assert!(rules.is_blocked("scam.com"));
/// assert!(!rules.is_blocked("evil-scam.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRuleSet")]
pub struct RuleSet {
    max_amount: Decimal,
    blocked_domains: BTreeSet<String>,
}

impl RuleSet {
    /// Creates a rule set, rejecting a non-positive limit.
    pub fn new<I, S>(max_amount: Decimal, blocked_domains: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if max_amount <= Decimal::ZERO {
            return Err(RuleError::NonPositiveLimit(max_amount));
        }
        Ok(Self {
            max_amount: max_amount.normalize(),
            blocked_domains: blocked_domains.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the maximum transfer amount.
    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    /// Returns the blocked email domains.
    pub fn blocked_domains(&self) -> &BTreeSet<String> {
        &self.blocked_domains
    }

    /// Returns `true` if the domain exactly matches a blocked entry.
    pub fn is_blocked(&self, domain: &str) -> bool {
        self.blocked_domains.contains(domain)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            max_amount: Decimal::new(1000, 0),
            blocked_domains: ["scam.com", "tempmail.com"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let domains: Vec<&str> = self.blocked_domains.iter().map(String::as_str).collect();
        write!(
            f,
            "max amount {}, blocked domains [{}]",
            self.max_amount,
            domains.join(", ")
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRuleSet {
    max_amount: Decimal,
    #[serde(default)]
    blocked_domains: Vec<String>,
}

impl TryFrom<RawRuleSet> for RuleSet {
    type Error = RuleError;

    fn try_from(raw: RawRuleSet) -> Result<Self, Self::Error> {
        RuleSet::new(raw.max_amount, raw.blocked_domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_limit() {
        assert_eq!(
            RuleSet::new(Decimal::ZERO, ["scam.com"]),
            Err(RuleError::NonPositiveLimit(Decimal::ZERO))
        );
        assert!(RuleSet::new(Decimal::new(-5, 0), Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_default_rules() {
        let rules = RuleSet::default();
        assert_eq!(rules.max_amount(), Decimal::new(1000, 0));
        assert!(rules.is_blocked("scam.com"));
        assert!(rules.is_blocked("tempmail.com"));
        assert!(!rules.is_blocked("gmail.com"));
    }

    #[test]
    fn test_blocking_is_exact_and_case_sensitive() {
        let rules = RuleSet::new(Decimal::ONE, ["scam.com"]).unwrap();
        assert!(!rules.is_blocked("evil-scam.com"));
        assert!(!rules.is_blocked("sub.scam.com"));
        assert!(!rules.is_blocked("SCAM.com"));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"maxAmount": 500, "blockedDomains": ["gmail.com"]}"#)
                .unwrap();
        assert_eq!(rules.max_amount(), Decimal::new(500, 0));
        assert!(rules.is_blocked("gmail.com"));
    }

    #[test]
    fn test_deserialize_rejects_zero_limit() {
        let result: Result<RuleSet, _> =
            serde_json::from_str(r#"{"maxAmount": 0, "blockedDomains": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let rules = RuleSet::new(Decimal::new(5000, 0), ["tempmail.com", "scam.com"]).unwrap();
        assert_eq!(
            rules.to_string(),
            "max amount 5000, blocked domains [scam.com, tempmail.com]"
        );
    }
}
