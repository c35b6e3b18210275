//! Form data model

mod errors;
mod field;
mod rules;
mod submission;
mod values;

pub use errors::*;
pub use field::*;
pub use rules::*;
pub use submission::*;
pub use values::*;
