//! Schema inference and transaction normalization for budget spreadsheets.
//!
//! Given the rows of a tab whose layout is unknown, [`infer_schema`] works out which columns hold
//! the date, description, amount and category, [`parse_transactions`] turns the rows into signed
//! and typed [`model::Transaction`] values, and [`build_append_row`] lays a transaction back out
//! as a row that fits the same tab.

pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
mod infer;
pub mod model;
pub mod normalize;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, Result};
pub use infer::infer_schema;
pub use normalize::{build_append_row, parse_transactions, parse_transactions_with};
