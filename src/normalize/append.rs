use crate::model::{Cell, ColumnMapping, Slot, Transaction};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use tracing::trace;

/// The format used for a date written on the caller's behalf.
pub const APPEND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds a row of exactly `column_count` cells for appending `transaction` to a sheet laid out
/// as `mapping` describes. A missing date is filled with today's local date.
///
/// See [`build_append_row_on`].
pub fn build_append_row(
    mapping: &ColumnMapping,
    transaction: &Transaction,
    column_count: usize,
    formula_columns: &BTreeSet<usize>,
) -> Vec<Cell> {
    build_append_row_on(
        mapping,
        transaction,
        column_count,
        formula_columns,
        Local::now().date_naive(),
    )
}

/// Builds a row of exactly `column_count` cells, using `today` when the transaction has no date.
///
/// Every cell starts out empty. The date, description, signed amount and category are then
/// written into their mapped columns, except where the column is unmapped, outside the row, or
/// listed in `formula_columns`. Those cells stay empty so a stale mapping or a live formula is
/// never overwritten. The amount is written as a number; when the transaction has no stored
/// signed amount one is derived from its type.
pub fn build_append_row_on(
    mapping: &ColumnMapping,
    transaction: &Transaction,
    column_count: usize,
    formula_columns: &BTreeSet<usize>,
    today: NaiveDate,
) -> Vec<Cell> {
    let mut row = vec![Cell::empty(); column_count];

    let date = match transaction.date().trim() {
        "" => today.format(APPEND_DATE_FORMAT).to_string(),
        date => date.to_string(),
    };

    let values = [
        (Slot::Date, Cell::Text(date)),
        (Slot::Description, Cell::from(transaction.description())),
        (
            Slot::Amount,
            Cell::Number(transaction.effective_signed_amount()),
        ),
        (Slot::Category, Cell::from(transaction.category())),
    ];

    for (slot, value) in values {
        match mapping.get(slot) {
            Some(ix) if ix >= column_count => {
                trace!("Not writing {slot}: column {ix} is outside a row of {column_count}")
            }
            Some(ix) if formula_columns.contains(&ix) => {
                trace!("Not writing {slot}: column {ix} holds a formula")
            }
            Some(ix) => row[ix] = value,
            None => {}
        }
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::normalize::{parse_transactions_with, RowIndexIds};
    use crate::test::grid;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn build(mapping: &ColumnMapping, txn: &Transaction, count: usize) -> Vec<Cell> {
        build_append_row_on(mapping, txn, count, &BTreeSet::new(), today())
    }

    fn expense(date: &str, amount: i64) -> Transaction {
        Transaction::from_magnitude(
            "id",
            date,
            "Lunch",
            "Food",
            Decimal::from(amount),
            TransactionType::Expense,
        )
    }

    #[test]
    fn test_date_and_amount_only() {
        let mapping = ColumnMapping::with_columns(["Date", "Amount"], Some(0), None, Some(1), None);
        let row = build(&mapping, &expense("2026-01-15", 75), 2);
        assert_eq!(
            row,
            vec![Cell::from("2026-01-15"), Cell::from(Decimal::from(-75))]
        );
    }

    #[test]
    fn test_missing_date_is_today() {
        let mapping = ColumnMapping::with_columns(["Date", "Amount"], Some(0), None, Some(1), None);
        let row = build(&mapping, &expense("", 75), 2);
        assert_eq!(row[0], Cell::from("2026-01-15"));
    }

    #[test]
    fn test_income_is_positive() {
        let mapping = ColumnMapping::with_columns(["Amount"], None, None, Some(0), None);
        let ten = Decimal::from(10);
        let txn = Transaction::from_magnitude("id", "", "", "", ten, TransactionType::Income);
        let row = build(&mapping, &txn, 1);
        assert_eq!(row, vec![Cell::from(Decimal::from(10))]);
    }

    #[test]
    fn test_stored_signed_amount_wins() {
        let mapping = ColumnMapping::with_columns(["Amount"], None, None, Some(0), None);
        let txn = Transaction::new("id", "", "", "", Decimal::from(-3), TransactionType::Expense);
        let row = build(&mapping, &txn, 1);
        assert_eq!(row[0].as_number(), Some(Decimal::from(-3)));
    }

    #[test]
    fn test_length_always_matches_column_count() {
        let mapping = ColumnMapping::with_columns(
            ["Date", "Description", "Amount", "Category"],
            Some(0),
            Some(1),
            Some(2),
            Some(3),
        );
        for count in [0, 1, 3, 4, 9] {
            let row = build(&mapping, &expense("2026-01-01", 1), count);
            assert_eq!(row.len(), count);
        }
        let empty = ColumnMapping::new(["x", "y", "z"]);
        let row = build(&empty, &expense("2026-01-01", 1), 3);
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(Cell::is_empty));
    }

    #[test]
    fn test_out_of_range_columns_are_ignored() {
        let mapping = ColumnMapping::with_columns(["a", "b"], Some(0), Some(5), Some(1), Some(2));
        let row = build(&mapping, &expense("2026-01-01", 2), 2);
        assert_eq!(
            row,
            vec![Cell::from("2026-01-01"), Cell::from(Decimal::from(-2))]
        );
    }

    #[test]
    fn test_formula_columns_are_never_written() {
        let mapping = ColumnMapping::with_columns(
            ["Date", "Description", "Amount", "Category", "Balance"],
            Some(0),
            Some(1),
            Some(2),
            Some(3),
        );
        let formulas = BTreeSet::from([2, 3, 4]);
        let row = build_append_row_on(&mapping, &expense("2026-01-01", 9), 5, &formulas, today());
        assert_eq!(row[0], Cell::from("2026-01-01"));
        assert_eq!(row[1], Cell::from("Lunch"));
        assert!(row[2].is_empty());
        assert!(row[3].is_empty());
        assert!(row[4].is_empty());
    }

    #[test]
    fn test_unmapped_columns_stay_empty() {
        let mapping = ColumnMapping::with_columns(
            ["Balance", "Date", "Amount"],
            Some(1),
            None,
            Some(2),
            None,
        );
        let row = build(&mapping, &expense("2026-01-01", 9), 3);
        assert!(row[0].is_empty());
    }

    #[test]
    fn test_parse_then_append_round_trip() {
        let mapping = ColumnMapping::with_columns(
            ["Category", "Amount", "Date", "Memo"],
            Some(2),
            Some(3),
            Some(1),
            Some(0),
        );
        let rows = grid(&[
            &["Groceries", "-85.50", "2026-01-01", "Woolworths"],
            &["Salary", "$5,500.00", "2026-01-02", "Payroll"],
            &["Fees", "(12.00)", "2026-01-03", "Bank fee"],
        ]);
        let txns = parse_transactions_with(&rows, &mapping, false, &RowIndexIds::new("r"));
        assert_eq!(txns.len(), 3);

        for (txn, original) in txns.iter().zip(&rows) {
            let row = build_append_row_on(&mapping, txn, 4, &BTreeSet::new(), today());
            assert_eq!(row[0], Cell::from(original[0].as_str()));
            assert_eq!(row[2], Cell::from(original[2].as_str()));
            assert_eq!(row[3], Cell::from(original[3].as_str()));
            let written = row[1].as_number().unwrap();
            assert_eq!(written.is_sign_negative(), txn.is_expense());
            assert_eq!(written.abs(), txn.amount());
        }
    }
}
