use crate::model::{
    cell, Amount, ColumnMapping, Transaction, TransactionType, DEFAULT_CATEGORY,
    DEFAULT_DESCRIPTION,
};
use crate::normalize::{IdGenerator, UniqueIds};
use tracing::{debug, trace};

/// Parses raw rows into transactions using `mapping`, with globally unique ids.
///
/// When `has_header` is true the first row is skipped. See [`parse_transactions_with`].
pub fn parse_transactions<S, R>(
    rows: &[R],
    mapping: &ColumnMapping,
    has_header: bool,
) -> Vec<Transaction>
where
    S: AsRef<str>,
    R: AsRef<[S]>,
{
    parse_transactions_with(rows, mapping, has_header, &UniqueIds::new())
}

/// Parses raw rows into transactions using `mapping` and the caller's id strategy.
///
/// Per row:
/// - Reads date, description, amount and category from the mapped columns. Unmapped columns and
///   short rows read as empty, and an unmapped amount reads as `0`.
/// - An amount in accounting parentheses, e.g. `(85.50)`, is always an expense with a negative
///   signed amount. Otherwise the sign decides, and zero counts as income.
/// - Amounts that do not parse become zero.
/// - Empty descriptions and categories get `No description` and `Uncategorized`.
/// - A row without a date whose amount is zero is dropped. These are the blank rows that
///   trail most sheets.
///
/// Ids are requested with the data row's zero-based position, header excluded.
pub fn parse_transactions_with<S, R>(
    rows: &[R],
    mapping: &ColumnMapping,
    has_header: bool,
    ids: &impl IdGenerator,
) -> Vec<Transaction>
where
    S: AsRef<str>,
    R: AsRef<[S]>,
{
    let data = if has_header {
        rows.get(1..).unwrap_or_default()
    } else {
        rows
    };

    let transactions: Vec<Transaction> = data
        .iter()
        .enumerate()
        .filter_map(|(ix, row)| parse_row(row.as_ref(), mapping, ix, ids))
        .collect();

    debug!(
        "Parsed {} transactions from {} data rows",
        transactions.len(),
        data.len()
    );
    transactions
}

fn parse_row<S: AsRef<str>>(
    row: &[S],
    mapping: &ColumnMapping,
    ix: usize,
    ids: &impl IdGenerator,
) -> Option<Transaction> {
    let date = cell(row, mapping.date_column()).trim();
    let description = cell(row, mapping.description_column()).trim();
    let category = cell(row, mapping.category_column()).trim();
    let raw_amount = match mapping.amount_column() {
        Some(column) => cell(row, Some(column)),
        None => "0",
    };

    let amount = Amount::parse_lenient(raw_amount);
    let signed = amount.value();
    let kind = if amount.is_accounting_negative() {
        TransactionType::Expense
    } else {
        TransactionType::from_signed(signed)
    };

    if date.is_empty() && signed.is_zero() {
        trace!("Skipping data row {ix}: no date and no amount");
        return None;
    }

    Some(Transaction::new(
        ids.id_for(ix),
        date,
        or_default(description, DEFAULT_DESCRIPTION),
        or_default(category, DEFAULT_CATEGORY),
        signed,
        kind,
    ))
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
