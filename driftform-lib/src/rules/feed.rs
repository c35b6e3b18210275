//! Latest-value rule broadcast

use tokio::sync::watch;

use crate::model::RuleSet;

/// Publishes rule snapshots to any number of subscribers.
///
/// # Example
///
/// ```
/// use driftform_lib::model::RuleSet;
/// use driftform_lib::rules::RuleFeed;
///
/// let feed = RuleFeed::new(RuleSet::default());
/// let rx = feed.subscribe();
/// assert_eq!(*rx.borrow(), RuleSet::default());
/// ```
#[derive(Debug, Clone)]
pub struct RuleFeed {
    tx: watch::Sender<RuleSet>,
}

impl RuleFeed {
    /// Creates a feed holding an initial snapshot.
    pub fn new(initial: RuleSet) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replaces the current snapshot and notifies subscribers.
    ///
    /// Subscribers are notified even when the new snapshot equals the old
    /// one.
    pub fn publish(&self, rules: RuleSet) {
        self.tx.send_replace(rules);
    }

    /// Returns a copy of the current snapshot.
    pub fn current(&self) -> RuleSet {
        self.tx.borrow().clone()
    }

    /// Returns a receiver that observes future snapshots.
    pub fn subscribe(&self) -> watch::Receiver<RuleSet> {
        self.tx.subscribe()
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RuleFeed {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_latest_snapshot() {
        let feed = RuleFeed::default();
        let mut rx = feed.subscribe();

        let strict = RuleSet::new(Decimal::new(10, 0), ["gmail.com"]).unwrap();
        feed.publish(strict.clone());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), strict);
        assert_eq!(feed.current(), strict);
    }

    #[test]
    fn test_subscriber_count() {
        let feed = RuleFeed::default();
        assert_eq!(feed.subscriber_count(), 0);
        let rx = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 1);
        drop(rx);
        assert_eq!(feed.subscriber_count(), 0);
    }
}
