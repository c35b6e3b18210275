//! Email address rules

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld` with no whitespace and a single `@`.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

/// Why an email address was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    /// Nothing was entered.
    #[error("Email is required")]
    Required,
    /// The input is not shaped like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidFormat,
    /// The domain is on the blocklist.
    #[error("Domain @{0} is currently not allowed")]
    BlockedDomain(String),
}

/// Returns the part of an address after its first `@`.
pub fn email_domain(value: &str) -> Option<&str> {
    value.split_once('@').map(|(_, domain)| domain)
}

/// Validates an email address against the format rule and a domain blocklist.
///
/// Domains are compared by exact string equality, so `evil-scam.com` is not
/// caught by a `scam.com` entry.
pub fn validate_email(value: &str, blocked_domains: &BTreeSet<String>) -> Result<(), EmailError> {
    if value.is_empty() {
        return Err(EmailError::Required);
    }

    if !EMAIL_PATTERN.is_match(value) {
        return Err(EmailError::InvalidFormat);
    }

    match email_domain(value) {
        Some(domain) if blocked_domains.contains(domain) => {
            Err(EmailError::BlockedDomain(domain.to_string()))
        }
        _ => Ok(()),
    }
}
