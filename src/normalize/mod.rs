//! Turns raw rows into [`Transaction`](crate::model::Transaction) values and back again.
//!
//! [`parse_transactions`] reads a tab through an inferred
//! [`ColumnMapping`](crate::model::ColumnMapping) and [`build_append_row`] lays a transaction out
//! as a row of cells for the same tab.

mod append;
mod ids;
mod parse;

pub use append::{build_append_row, build_append_row_on, APPEND_DATE_FORMAT};
pub use ids::{IdGenerator, RowIndexIds, UniqueIds};
pub use parse::{parse_transactions, parse_transactions_with};
