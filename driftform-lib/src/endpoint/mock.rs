//! Randomized stand-in for a remote validation service

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use super::SubmitEndpoint;
use super::SubmitResponse;
use crate::error::ServerFieldError;
use crate::error::SubmitError;
use crate::model::FormValues;
use crate::validation::parse_amount;

/// Message returned when the mock accepts a submission.
pub const MOCK_SUCCESS_MESSAGE: &str = "Transaction submitted successfully!";

/// Message used for random account-level rejections.
pub const MOCK_ACCOUNT_REJECTION: &str = "Account validation failed on the server.";

/// Behaviour of a [`MockEndpoint`].
///
/// The mock deliberately disagrees with the client rules: it has its own
/// blacklisted domain, its own transfer limit, and rejects some valid
/// submissions at random.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use driftform_lib::endpoint::MockConfig;
///
/// let config = MockConfig::default()
///     .with_delay(Duration::from_millis(100), Duration::from_millis(500))
///     .with_transport_failure_rate(0.0)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Shortest simulated network delay.
    ///
    /// Default: 1 second
    pub min_delay: Duration,

    /// Longest simulated network delay.
    ///
    /// Default: 3 seconds
    pub max_delay: Duration,

    /// Probability of a random account-level rejection.
    ///
    /// Default: 0.3
    pub rejection_rate: f64,

    /// Probability that the call fails without a verdict.
    ///
    /// Default: 0.1
    pub transport_failure_rate: f64,

    /// Highest amount the server accepts.
    ///
    /// Default: 5000
    pub server_max_amount: Decimal,

    /// Email domain the server refuses regardless of client rules.
    ///
    /// Default: `example.com`
    pub blacklisted_domain: String,

    /// Seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(3),
            rejection_rate: 0.3,
            transport_failure_rate: 0.1,
            server_max_amount: Decimal::new(5000, 0),
            blacklisted_domain: "example.com".to_string(),
            seed: None,
        }
    }
}

impl MockConfig {
    /// Creates a new mock config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that answers immediately and never fails at random.
    pub fn deterministic() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            rejection_rate: 0.0,
            transport_failure_rate: 0.0,
            ..Default::default()
        }
    }

    /// Sets the delay range. The bounds are swapped if given in reverse.
    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min.min(max);
        self.max_delay = min.max(max);
        self
    }

    /// Sets the random rejection probability.
    pub fn with_rejection_rate(mut self, rate: f64) -> Self {
        self.rejection_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the transport failure probability.
    pub fn with_transport_failure_rate(mut self, rate: f64) -> Self {
        self.transport_failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the server-side transfer limit.
    pub fn with_server_max_amount(mut self, max: Decimal) -> Self {
        self.server_max_amount = max;
        self
    }

    /// Sets the server-side blacklisted domain.
    pub fn with_blacklisted_domain(mut self, domain: impl Into<String>) -> Self {
        self.blacklisted_domain = domain.into();
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What the dice decided for one call.
struct Roll {
    delay: Duration,
    transport_failure: bool,
    account_rejection: bool,
}

/// A [`SubmitEndpoint`] that simulates a slow, opinionated backend.
pub struct MockEndpoint {
    config: MockConfig,
    rng: Mutex<StdRng>,
}

impl MockEndpoint {
    /// Creates a new mock endpoint.
    pub fn new(config: MockConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    fn roll(&self) -> Roll {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let min = self.config.min_delay.as_millis() as u64;
        let max = self.config.max_delay.as_millis() as u64;
        Roll {
            delay: Duration::from_millis(rng.random_range(min..=max.max(min))),
            transport_failure: rng.random::<f64>() < self.config.transport_failure_rate,
            account_rejection: rng.random::<f64>() < self.config.rejection_rate,
        }
    }

    /// Applies the server's own rules to a submission.
    fn verdict(&self, values: &FormValues, account_rejection: bool) -> SubmitResponse {
        let mut errors = Vec::new();

        let suffix = format!("@{}", self.config.blacklisted_domain);
        if values.email.ends_with(&suffix) {
            errors.push(ServerFieldError::new(
                "email",
                format!(
                    "Email domain @{} is currently blacklisted.",
                    self.config.blacklisted_domain
                ),
            ));
        }

        let limit = self.config.server_max_amount;
        if parse_amount(&values.amount).is_some_and(|amount| amount.exceeds(limit)) {
            errors.push(ServerFieldError::new(
                "amount",
                format!(
                    "Server limit for transfer is currently {}.",
                    self.config.server_max_amount
                ),
            ));
        }

        if account_rejection && !errors.iter().any(|e| e.field == "email") {
            errors.push(ServerFieldError::new("email", MOCK_ACCOUNT_REJECTION));
        }

        if errors.is_empty() {
            SubmitResponse::accepted(MOCK_SUCCESS_MESSAGE)
        } else {
            SubmitResponse::rejected(errors)
        }
    }
}

impl Default for MockEndpoint {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

#[async_trait]
impl SubmitEndpoint for MockEndpoint {
    async fn submit(&self, values: &FormValues) -> Result<SubmitResponse, SubmitError> {
        let roll = self.roll();
        log::debug!("mock endpoint answering in {:?}", roll.delay);
        tokio::time::sleep(roll.delay).await;

        if roll.transport_failure {
            return Err(SubmitError::unavailable("simulated network outage"));
        }

        Ok(self.verdict(values, roll.account_rejection))
    }
}
