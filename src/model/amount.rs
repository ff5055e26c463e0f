//! Amount type for handling monetary values as they are typed into spreadsheets.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may include a currency glyph (`$`, `£`, `€`), comma thousands separators, stray whitespace or
//! accounting parentheses such as `(85.50)`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::trace;

/// Currency glyphs that are stripped from amount cells and count as amount evidence in headers.
pub const CURRENCY_GLYPHS: &[char] = &['$', '£', '€'];

/// Represents how an amount was (or should be) formatted.
///
/// # Examples
///  - `currency: Some('$'), commas: true, parentheses: false` -> `-$60,000.00`
///  - `currency: None, commas: true, parentheses: false` -> `-60,000.00`
///  - `currency: Some('£'), commas: false, parentheses: true` -> `(£60000.00)`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    /// The currency glyph present in the formatting, if any.
    currency: Option<char>,
    /// Whether commas are present as thousands separators in the formatting.
    commas: bool,
    /// Whether the value was wrapped in accounting parentheses.
    parentheses: bool,
}

impl AmountFormat {
    pub const fn new(currency: Option<char>, commas: bool, parentheses: bool) -> Self {
        Self {
            currency,
            commas,
            parentheses,
        }
    }

    /// Inspects a raw cell and records which decorations it carries. This never fails, so a cell
    /// whose number cannot be parsed still reports whether it used accounting notation.
    pub fn detect(s: &str) -> Self {
        let cleaned = clean(s);
        Self {
            currency: s.chars().find(|c| CURRENCY_GLYPHS.contains(c)),
            commas: s.contains(','),
            parentheses: accounting_inner(&cleaned).is_some(),
        }
    }

    pub fn currency(&self) -> Option<char> {
        self.currency
    }

    pub fn commas(&self) -> bool {
        self.commas
    }

    pub fn parentheses(&self) -> bool {
        self.parentheses
    }
}

/// Represents a monetary amount parsed from a spreadsheet cell.
///
/// Formatting is considered significant for the purposes of equality, so for numeric comparisons
/// you should access the `Decimal` value and use that.
///
/// # Examples
///
/// Parsing with currency and commas:
/// ```
/// # use sheet_budget::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$5,500.00").unwrap();
/// assert_eq!(amount.to_string(), "$5,500.00");
/// assert_eq!(amount.value(), rust_decimal::Decimal::from(5500));
/// ```
///
/// Accounting notation is always negative:
/// ```
/// # use sheet_budget::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("(85.50)").unwrap();
/// assert!(amount.is_negative());
/// assert!(amount.is_accounting_negative());
/// assert_eq!(amount.to_string(), "(85.50)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    /// The parsed, signed numerical value.
    value: Decimal,
    /// The way the numerical value was parsed from, or should be written to, a `String`.
    format: AmountFormat,
}

impl Amount {
    /// Creates a new Amount from a Decimal value with plain formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: AmountFormat::new(None, false, false),
        }
    }

    /// Creates a new Amount from a Decimal value with the specified formatting.
    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Parses `s` the way an import does: anything that is not a number becomes zero. The
    /// detected format is kept even when the number is garbage.
    pub fn parse_lenient(s: &str) -> Self {
        match Amount::from_str(s) {
            Ok(amount) => amount,
            Err(e) => {
                trace!("Treating unparseable amount '{s}' as zero: {e}");
                Amount::new_with_format(Decimal::ZERO, AmountFormat::detect(s))
            }
        }
    }

    /// Returns the underlying signed Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the absolute value.
    pub fn magnitude(&self) -> Decimal {
        self.value.abs()
    }

    pub fn format(&self) -> AmountFormat {
        self.format
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// Returns true if the amount was written in accounting notation, e.g. `(12.00)`.
    pub fn is_accounting_negative(&self) -> bool {
        self.format.parentheses
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = AmountFormat::detect(s);
        let cleaned = clean(s);

        if cleaned.is_empty() {
            return Ok(Amount::new_with_format(Decimal::ZERO, format));
        }

        let value = match accounting_inner(&cleaned) {
            // Parentheses win over whatever sign is written inside them.
            Some(inner) => -parse_decimal(inner)?.abs(),
            None => parse_decimal(&cleaned)?,
        };

        // Avoid carrying a negative zero around, e.g. from `(0.00)` or `-0`.
        let value = if value.is_zero() { Decimal::ZERO } else { value };

        Ok(Amount { value, format })
    }
}

/// Strips currency glyphs, commas and all whitespace.
pub(crate) fn clean(s: &str) -> String {
    s.chars()
        .filter(|&c| !CURRENCY_GLYPHS.contains(&c) && c != ',' && !c.is_whitespace())
        .collect()
}

fn accounting_inner(cleaned: &str) -> Option<&str> {
    cleaned.strip_prefix('(')?.strip_suffix(')')
}

fn parse_decimal(s: &str) -> Result<Decimal, AmountError> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(AmountError)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = self.value().abs();
        let glyph = self
            .format
            .currency
            .map(String::from)
            .unwrap_or_default();

        let digits = if self.format.commas {
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        } else {
            num.to_string()
        };

        match (self.is_negative(), self.format.parentheses) {
            (true, true) => write!(f, "({glyph}{digits})"),
            (true, false) => write!(f, "-{glyph}{digits}"),
            (false, _) => write!(f, "{glyph}{digits}"),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
        assert_eq!(amount.format().currency(), Some('$'));
    }

    #[test]
    fn test_parse_pound_and_euro() {
        assert_eq!(Amount::from_str("£12.30").unwrap().value(), dec("12.3"));
        assert_eq!(Amount::from_str("-€7").unwrap().value(), dec("-7"));
        assert_eq!(Amount::from_str("€ -7").unwrap().value(), dec("-7"));
    }

    #[test]
    fn test_parse_currency_and_commas() {
        let amount = Amount::from_str("$5,500.00").unwrap();
        assert_eq!(amount.value(), dec("5500"));
        assert!(amount.format().commas());
    }

    #[test]
    fn test_parse_accounting_parentheses() {
        let amount = Amount::from_str("(85.50)").unwrap();
        assert_eq!(amount.value(), dec("-85.5"));
        assert_eq!(amount.magnitude(), dec("85.5"));
        assert!(amount.is_accounting_negative());
    }

    #[test]
    fn test_parse_accounting_parentheses_with_inner_sign() {
        let amount = Amount::from_str("(-85.50)").unwrap();
        assert_eq!(amount.value(), dec("-85.5"));
    }

    #[test]
    fn test_parse_accounting_with_currency_and_spaces() {
        let amount = Amount::from_str(" ( $1,200.00 ) ").unwrap();
        assert_eq!(amount.value(), dec("-1200"));
        assert_eq!(amount.to_string(), "($1,200.00)");
    }

    #[test]
    fn test_parenthesized_zero_is_not_negative_zero() {
        let amount = Amount::from_str("(0.00)").unwrap();
        assert!(amount.is_zero());
        assert!(!amount.is_negative());
        assert!(amount.is_accounting_negative());
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
        let amount = Amount::from_str("  ").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_scientific() {
        let amount = Amount::from_str("1.5e3").unwrap();
        assert_eq!(amount.value(), dec("1500"));
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("12abc").is_err());
        assert!(Amount::from_str("()").is_err());
    }

    #[test]
    fn test_parse_lenient_garbage_is_zero() {
        let amount = Amount::parse_lenient("n/a");
        assert!(amount.is_zero());
        assert!(!amount.is_accounting_negative());
    }

    #[test]
    fn test_parse_lenient_keeps_parentheses_flag() {
        let amount = Amount::parse_lenient("(oops)");
        assert!(amount.is_zero());
        assert!(amount.is_accounting_negative());
    }

    #[test]
    fn test_display_plain() {
        let amount = Amount::new(dec("-50.00"));
        assert_eq!(amount.to_string(), "-50.00");
    }

    #[test]
    fn test_display_retains_source_format() {
        for s in ["-$60,000.00", "1,000,000.00", "-$1000000.00", "€12.50", "(£4.20)"] {
            assert_eq!(Amount::from_str(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let amount = Amount::from_str("$50.00").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"$50.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn test_equality_is_format_sensitive() {
        let a = Amount::from_str("-5000.00").unwrap();
        let b = Amount::from_str("-$5,000.00").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.value(), b.value());
    }

    #[test]
    fn test_sign_predicates() {
        let zero = Amount::from_str("$0.00").unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Amount::from_str("$50.00").unwrap().is_positive());
        assert!(Amount::from_str("-$50.00").unwrap().is_negative());
    }
}
