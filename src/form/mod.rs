//! Form building blocks: field model and reusable rules

pub mod field;
pub mod rules;

pub use field::{FieldKind, FormField};
pub use rules::{ErrorMessage, Rule};
