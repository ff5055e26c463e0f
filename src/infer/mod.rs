//! Schema inference: works out which columns of an arbitrary sheet hold the date, description,
//! amount and category of a transaction.
//!
//! Inference runs in two passes. The first looks only at header text, trying the classifiers
//! from [`keywords`] against each header in a fixed order; the left-most header wins a slot. The
//! second pass only runs when sample rows are supplied, and fills the date, amount and
//! description slots that are still empty by looking at the first few values of each unclaimed
//! column. Nothing here fails: a column that cannot be classified stays unassigned.

mod keywords;
mod sample;

use crate::model::{ColumnMapping, Slot};
use keywords::{
    classifiers, credit_pattern, debit_pattern, normalize_header, running_total_pattern,
};
use sample::{column_sample, is_amount_like, is_date_like, is_text_like, SAMPLE_SIZE};
use tracing::debug;

/// Infers a [`ColumnMapping`] from a header row and some data rows.
///
/// `headers` may be all empty for a sheet without a header row. `sample_rows` should be data
/// rows only; the first five of them are inspected. Rows may be ragged.
///
/// When a sheet splits money into separate debit and credit columns, and has no other column
/// carrying a transaction's amount, the amount slot is left unassigned.
///
/// # Example
/// ```
/// # use sheet_budget::infer_schema;
/// let headers = ["Tanggal", "Keterangan", "Jumlah", "Kategori"];
/// let rows: Vec<Vec<String>> = Vec::new();
/// let mapping = infer_schema(&headers, &rows);
/// assert_eq!(mapping.date_column(), Some(0));
/// assert_eq!(mapping.description_column(), Some(1));
/// assert_eq!(mapping.amount_column(), Some(2));
/// assert_eq!(mapping.category_column(), Some(3));
/// ```
pub fn infer_schema<H, S, R>(headers: &[H], sample_rows: &[R]) -> ColumnMapping
where
    H: AsRef<str>,
    S: AsRef<str>,
    R: AsRef<[S]>,
{
    let lowered: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();
    let mut mapping = ColumnMapping::new(headers.iter().map(|h| h.as_ref()));

    let split = has_split_amount(&lowered);
    if split {
        debug!("Debit and credit are split across columns, leaving the amount slot unassigned");
    }

    classify_headers(&mut mapping, &lowered, split);

    if !sample_rows.is_empty() {
        let width = sample_rows
            .iter()
            .take(SAMPLE_SIZE)
            .map(|row| row.as_ref().len())
            .max()
            .unwrap_or_default()
            .max(headers.len());
        classify_samples(&mut mapping, sample_rows, width, split);
    }

    mapping
}

/// Pass 1: header text only.
fn classify_headers(mapping: &mut ColumnMapping, headers: &[String], split: bool) {
    for (ix, header) in headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        let claimed = classifiers()
            .iter()
            .filter(|c| !(split && c.slot() == Slot::Amount))
            .find(|c| c.matches(header) && mapping.claim(c.slot(), ix));
        if let Some(classifier) = claimed {
            debug!(
                "Header '{header}' in column {ix} claimed as {}",
                classifier.slot()
            );
        }
    }
}

/// Pass 2: the values themselves.
fn classify_samples<S, R>(mapping: &mut ColumnMapping, rows: &[R], width: usize, split: bool)
where
    S: AsRef<str>,
    R: AsRef<[S]>,
{
    if mapping.date_column().is_none() {
        claim_first(mapping, Slot::Date, width, |ix| {
            is_date_like(&column_sample(rows, ix))
        });
    }

    if mapping.amount_column().is_none() && !split {
        claim_first(mapping, Slot::Amount, width, |ix| {
            is_amount_like(&column_sample(rows, ix))
        });
    }

    if mapping.description_column().is_none() {
        claim_first(mapping, Slot::Description, width, |ix| {
            is_text_like(&column_sample(rows, ix))
        });
    }
}

/// Gives `slot` the left-most unassigned column that satisfies `predicate`.
fn claim_first(
    mapping: &mut ColumnMapping,
    slot: Slot,
    width: usize,
    predicate: impl Fn(usize) -> bool,
) {
    let found = (0..width).find(|&ix| !mapping.is_assigned(ix) && predicate(ix));
    if let Some(ix) = found {
        mapping.claim(slot, ix);
        debug!("Column {ix} claimed as {slot} from its values");
    }
}

/// True when the headers contain a debit-only column and a separate credit-only column, and no
/// other column that would carry a transaction's amount. Running balances do not count.
fn has_split_amount(headers: &[String]) -> bool {
    let debit = headers.iter().position(|h| debit_pattern().is_match(h));
    let credit = headers.iter().position(|h| credit_pattern().is_match(h));
    let (Some(debit), Some(credit)) = (debit, credit) else {
        return false;
    };
    if debit == credit {
        return false;
    }

    let amount = classifiers()
        .iter()
        .find(|c| c.slot() == Slot::Amount);
    let other_amount = headers.iter().enumerate().any(|(ix, h)| {
        ix != debit
            && ix != credit
            && !running_total_pattern().is_match(h)
            && !debit_pattern().is_match(h)
            && !credit_pattern().is_match(h)
            && amount.is_some_and(|c| c.matches(h))
    });
    !other_amount
}
