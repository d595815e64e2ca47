//! Request validation rules and sanitization

pub mod sanitize;
pub mod validation;

pub use sanitize::{escape_markup, sanitize_text};
pub use validation::{validate, Constraint, UnknownFields, ValidationRule, ValidationRules};
