//! Result filtering and presentation

pub mod filter;
pub mod writers;

pub use filter::{present, retained_rows, CategoryFilter, CategoryId, ResultRenderer};
pub use writers::{JsonLinesRenderer, PlainTextRenderer};
