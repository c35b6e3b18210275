//! Engine configuration

use crate::model::FormValues;
use crate::model::RuleSet;

/// Banner shown when a submission produced no verdict.
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error or unexpected failure.";

/// Configuration for a [`FormEngine`](super::FormEngine).
///
/// # Example
///
/// ```
/// use driftform_lib::EngineConfig;
/// use driftform_lib::model::FormValues;
///
/// let config = EngineConfig::default()
///     .with_initial_values(FormValues::new("me@ok.com", ""))
///     .with_network_failure_message("Could not reach the bank.");
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rules in force until the first snapshot arrives.
    ///
    /// Default: [`RuleSet::default`]
    pub initial_rules: RuleSet,

    /// Values the form starts with.
    ///
    /// Default: every field empty
    pub initial_values: FormValues,

    /// Banner text for transport-level failures.
    ///
    /// Default: [`NETWORK_FAILURE_MESSAGE`]
    pub network_failure_message: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_rules: RuleSet::default(),
            initial_values: FormValues::default(),
            network_failure_message: NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Creates a new engine config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial rules.
    pub fn with_initial_rules(mut self, rules: RuleSet) -> Self {
        self.initial_rules = rules;
        self
    }

    /// Sets the initial values.
    pub fn with_initial_values(mut self, values: FormValues) -> Self {
        self.initial_values = values;
        self
    }

    /// Sets the transport failure banner text.
    pub fn with_network_failure_message(mut self, message: impl Into<String>) -> Self {
        self.network_failure_message = message.into();
        self
    }
}
