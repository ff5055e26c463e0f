//! Types that represent the core data model, such as `Transaction` and `ColumnMapping`.
mod amount;
mod cell;
mod grid;
mod mapping;
mod transaction;

pub use amount::{Amount, AmountError, AmountFormat, CURRENCY_GLYPHS};
pub(crate) use amount::clean as clean_amount;
pub use cell::Cell;
pub use grid::{cell, is_blank_row, Grid};
pub use mapping::{ColumnMapping, Slot};
pub use transaction::{Transaction, TransactionType, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
