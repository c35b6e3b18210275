//! Error types

mod field;
mod rules;
mod submit;

pub use field::*;
pub use rules::*;
pub use submit::*;
