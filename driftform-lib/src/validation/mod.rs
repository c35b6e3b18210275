//! Client-side field validation.
//!
//! Validators are pure functions of a raw field value and the relevant part
//! of the current [`RuleSet`](crate::model::RuleSet). They never touch
//! engine or submission state and report failure as a typed error value.
//!
//! # Example
//!
//! ```
//! use driftform_lib::model::{Field, FormValues, RuleSet};
//! use driftform_lib::validation::validate_form;
//!
//! let values = FormValues::new("a@scam.com", "100");
//! let errors = validate_form(&values, &RuleSet::default());
//!
//! assert_eq!(
//!     errors.get(Field::Email),
//!     Some("Domain @scam.com is currently not allowed")
//! );
//! assert!(!errors.contains(Field::Amount));
//! ```

mod amount;
mod email;
mod form;

pub use amount::{Amount, AmountError, parse_amount, validate_amount};
pub use email::{EmailError, email_domain, validate_email};
pub use form::{FieldIssue, validate_field, validate_form};
