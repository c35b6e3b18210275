//! Form validation under shifting rules
//!
//! Reconciles locally computed validation errors, errors reported by a
//! remote endpoint, an in-flight submission and a rule set that changes at
//! runtime into a single consistent view of a two-field transfer form.

pub mod endpoint;
pub mod engine;
pub mod error;
pub mod model;
pub mod rules;
pub mod validation;

pub use engine::*;
