//! Rule sources
//!
//! Rules reach the engine as whole [`RuleSet`](crate::model::RuleSet)
//! snapshots through a latest-value channel. Only the newest snapshot
//! matters; intermediate ones may be skipped by slow consumers.

mod feed;
mod random;

pub use feed::*;
pub use random::*;
