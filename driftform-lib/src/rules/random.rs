//! Rules that drift on a timer

use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::RuleFeed;
use crate::model::RuleSet;

/// Domains blocked in every generated rule set.
pub const BASE_BLOCKED_DOMAINS: [&str; 2] = ["scam.com", "tempmail.com"];

/// Domain that is sometimes added to the blocklist.
pub const OCCASIONAL_BLOCKED_DOMAIN: &str = "gmail.com";

/// Behaviour of a [`RandomRuleSource`].
#[derive(Debug, Clone)]
pub struct RuleSourceConfig {
    /// Time between two published rule sets.
    ///
    /// Default: 10 seconds
    pub interval: Duration,

    /// Limit used when the coin lands low.
    ///
    /// Default: 1000
    pub low_limit: Decimal,

    /// Limit used when the coin lands high.
    ///
    /// Default: 5000
    pub high_limit: Decimal,

    /// Probability that [`OCCASIONAL_BLOCKED_DOMAIN`] is blocked.
    ///
    /// Default: 0.3
    pub extra_domain_rate: f64,

    /// Seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RuleSourceConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            low_limit: Decimal::new(1000, 0),
            high_limit: Decimal::new(5000, 0),
            extra_domain_rate: 0.3,
            seed: None,
        }
    }
}

impl RuleSourceConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the publish interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the two limits the source alternates between.
    pub fn with_limits(mut self, low: Decimal, high: Decimal) -> Self {
        self.low_limit = low;
        self.high_limit = high;
        self
    }

    /// Sets the probability of blocking the occasional domain.
    pub fn with_extra_domain_rate(mut self, rate: f64) -> Self {
        self.extra_domain_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Publishes a freshly drawn rule set on every tick.
pub struct RandomRuleSource {
    config: RuleSourceConfig,
    rng: StdRng,
}

impl RandomRuleSource {
    /// Creates a new source.
    pub fn new(config: RuleSourceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    /// Draws the next rule set.
    ///
    /// Falls back to the default rules if the configured limits are not
    /// positive.
    pub fn next_rules(&mut self) -> RuleSet {
        let max_amount = if self.rng.random::<f64>() > 0.5 {
            self.config.high_limit
        } else {
            self.config.low_limit
        };

        let mut domains: Vec<&str> = BASE_BLOCKED_DOMAINS.to_vec();
        if self.rng.random::<f64>() < self.config.extra_domain_rate {
            domains.push(OCCASIONAL_BLOCKED_DOMAIN);
        }

        RuleSet::new(max_amount, domains).unwrap_or_else(|err| {
            log::warn!("rule source produced invalid rules ({err}), using defaults");
            RuleSet::default()
        })
    }

    /// Runs the source on the current runtime, publishing into `feed`.
    ///
    /// The task stops when `cancel` fires or when the feed has no
    /// subscribers left after a tick.
    pub fn spawn(mut self, feed: RuleFeed, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = self.config.interval.max(Duration::from_millis(1));
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; the initial rules are already in the feed.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        log::debug!("rule source cancelled");
                        return;
                    }
                    _ = ticker.tick() => {
                        let rules = self.next_rules();
                        log::info!("rules changed: {rules}");
                        feed.publish(rules);
                        if feed.subscriber_count() == 0 {
                            log::debug!("rule source has no subscribers, stopping");
                            return;
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_rules_shape() {
        let mut source = RandomRuleSource::new(RuleSourceConfig::default().with_seed(3));
        for _ in 0..100 {
            let rules = source.next_rules();
            assert!(
                rules.max_amount() == Decimal::new(1000, 0)
                    || rules.max_amount() == Decimal::new(5000, 0)
            );
            for domain in BASE_BLOCKED_DOMAINS {
                assert!(rules.is_blocked(domain));
            }
            assert!(rules.blocked_domains().len() <= 3);
        }
    }

    #[test]
    fn test_extra_domain_rate_bounds() {
        let mut never = RandomRuleSource::new(
            RuleSourceConfig::default().with_extra_domain_rate(0.0).with_seed(1),
        );
        let mut always = RandomRuleSource::new(
            RuleSourceConfig::default().with_extra_domain_rate(1.0).with_seed(1),
        );
        for _ in 0..20 {
            assert!(!never.next_rules().is_blocked(OCCASIONAL_BLOCKED_DOMAIN));
            assert!(always.next_rules().is_blocked(OCCASIONAL_BLOCKED_DOMAIN));
        }
    }

    #[test]
    fn test_invalid_limits_fall_back_to_defaults() {
        let mut source = RandomRuleSource::new(
            RuleSourceConfig::default()
                .with_limits(Decimal::ZERO, Decimal::ZERO)
                .with_seed(9),
        );
        assert_eq!(source.next_rules().max_amount(), RuleSet::default().max_amount());
    }

    #[tokio::test]
    async fn test_spawned_source_publishes_and_cancels() {
        let feed = RuleFeed::default();
        let mut rx = feed.subscribe();
        let cancel = CancellationToken::new();

        let handle = RandomRuleSource::new(
            RuleSourceConfig::default()
                .with_interval(Duration::from_millis(5))
                .with_seed(11),
        )
        .spawn(feed.clone(), cancel.clone());

        rx.changed().await.unwrap();
        cancel.cancel();
        handle.await.unwrap();
    }
}
