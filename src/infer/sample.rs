//! Predicates over a small sample of a column's values, used when headers say nothing useful.

use crate::model::{cell, clean_amount, Amount};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Only this many leading data rows are inspected per column.
pub(crate) const SAMPLE_SIZE: usize = 5;

/// Share of non-empty values that must look like dates.
const DATE_RATIO: f64 = 0.5;

/// Share of sampled values that must parse as numbers.
const AMOUNT_RATIO: f64 = 0.5;

/// Share of sampled values that must look like free text.
const TEXT_RATIO: f64 = 0.4;

/// Takes up to [`SAMPLE_SIZE`] values of `column`. Short rows contribute an empty value.
pub(crate) fn column_sample<'a, S, R>(rows: &'a [R], column: usize) -> Vec<&'a str>
where
    S: AsRef<str> + 'a,
    R: AsRef<[S]>,
{
    rows.iter()
        .take(SAMPLE_SIZE)
        .map(|row| cell(row.as_ref(), Some(column)))
        .collect()
}

fn date_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // 2026-01-31
            r"^\d{4}-\d{1,2}-\d{1,2}",
            // 31/01/2026 or 01/31/2026, deliberately not told apart
            r"^\d{1,2}/\d{1,2}/\d{4}",
            // 31-01-2026
            r"^\d{1,2}-\d{1,2}-\d{4}",
            // 1/2/26
            r"^\d{1,2}/\d{1,2}/\d{2}",
            // Jan 5, January 5th, Sept. 3
            concat!(
                r"(?i)^(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?",
                r"|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)",
                r"\.?\s+\d{1,2}(st|nd|rd|th)?\b",
            ),
        ]
        .iter()
        .map(|p| Regex::new(p).expect("date patterns are valid"))
        .collect()
    })
}

fn non_text_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s\p{P}\p{S}]+$").expect("non-text pattern is valid"))
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64
}

/// Whether a single value has a recognised date shape.
pub(crate) fn looks_like_date(value: &str) -> bool {
    let value = value.trim();
    date_patterns().iter().any(|re| re.is_match(value))
}

/// Whether a single value is a number once currency glyphs, commas and whitespace are removed.
pub(crate) fn looks_like_amount(value: &str) -> bool {
    !clean_amount(value).is_empty() && Amount::from_str(value).is_ok()
}

/// Whether a single value reads as free text rather than a number, code or date.
pub(crate) fn looks_like_text(value: &str) -> bool {
    let value = value.trim();
    value.chars().count() > 2 && !non_text_pattern().is_match(value)
}

/// At least half of the non-empty values look like dates.
pub(crate) fn is_date_like(values: &[&str]) -> bool {
    let non_empty: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    let hits = non_empty.iter().filter(|v| looks_like_date(v)).count();
    !non_empty.is_empty() && ratio(hits, non_empty.len()) >= DATE_RATIO
}

/// At least half of the values parse as numbers. Empty values count against the column.
pub(crate) fn is_amount_like(values: &[&str]) -> bool {
    let hits = values.iter().filter(|v| looks_like_amount(v)).count();
    ratio(hits, values.len()) >= AMOUNT_RATIO
}

/// At least 40% of the values read as text.
pub(crate) fn is_text_like(values: &[&str]) -> bool {
    let hits = values.iter().filter(|v| looks_like_text(v)).count();
    ratio(hits, values.len()) >= TEXT_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_shapes() {
        for v in [
            "2026-01-01",
            "2026-01-01T10:00:00Z",
            "31/01/2026",
            "01/31/2026",
            "31-01-2026",
            "1/2/26",
            "Jan 5",
            "january 15, 2026",
            "January 5th",
            "Sept. 3",
            "june 30",
        ] {
            assert!(looks_like_date(v), "{v}");
        }
        for v in [
            "",
            "85.50",
            "Groceries",
            "2026",
            "5 Jan",
            "Marketing 2",
            "Decathlon 12",
            "Mayfair 3 parking",
            "Junk 5",
            "Jan 123",
        ] {
            assert!(!looks_like_date(v), "{v}");
        }
    }

    #[test]
    fn test_date_ratio_ignores_empty() {
        assert!(is_date_like(&["2026-01-01", "", "", "", ""]));
        assert!(is_date_like(&["2026-01-01", "junk"]));
        assert!(!is_date_like(&["2026-01-01", "junk", "junk"]));
        assert!(!is_date_like(&["", ""]));
        assert!(!is_date_like(&[]));
    }

    #[test]
    fn test_amount_shapes() {
        for v in ["-85.50", "$5,500.00", "£ 12", "(85.50)", "0", "1e3"] {
            assert!(looks_like_amount(v), "{v}");
        }
        for v in ["", " ", "$", "2026-01-01", "abc", "12/01/2026"] {
            assert!(!looks_like_amount(v), "{v}");
        }
    }

    #[test]
    fn test_amount_ratio_counts_empty() {
        assert!(is_amount_like(&["1", "2", "", ""]));
        assert!(!is_amount_like(&["1", "", "", ""]));
        assert!(!is_amount_like(&[]));
    }

    #[test]
    fn test_text_shapes() {
        assert!(looks_like_text("Grocery shopping"));
        assert!(looks_like_text("ATM"));
        assert!(!looks_like_text("ok"));
        assert!(!looks_like_text("-85.50"));
        assert!(!looks_like_text("$1,000"));
        assert!(!looks_like_text("2026-01-01"));
        assert!(!looks_like_text("12 34"));
    }

    #[test]
    fn test_text_ratio() {
        assert!(is_text_like(&["Coffee", "Rent", "", "", ""]));
        assert!(!is_text_like(&["Coffee", "", "", "", ""]));
    }

    #[test]
    fn test_column_sample_takes_five_and_pads() {
        let rows = vec![
            vec!["a", "1"],
            vec!["b"],
            vec!["c", "3"],
            vec!["d", "4"],
            vec!["e", "5"],
            vec!["f", "6"],
        ];
        assert_eq!(column_sample(&rows, 1), vec!["1", "", "3", "4", "5"]);
        assert_eq!(column_sample(&rows, 0).len(), SAMPLE_SIZE);
    }
}
