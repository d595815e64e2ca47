//! Request and result models

pub mod request;
pub mod row;

pub use request::{FieldValue, RequestFields};
pub use row::{ResultRow, RowValue};
