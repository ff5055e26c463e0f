use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Used when a row has no description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Used when a row has no category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Whether money entered or left the tracked account.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// Classifies a signed value. Zero counts as income.
    pub fn from_signed(value: Decimal) -> Self {
        if value.is_sign_negative() && !value.is_zero() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }

    /// Applies this direction to a magnitude: positive for income, negative for expense.
    pub fn sign(&self, magnitude: Decimal) -> Decimal {
        match self {
            TransactionType::Income => magnitude.abs(),
            TransactionType::Expense => -magnitude.abs(),
        }
    }
}

/// One canonical ledger entry.
///
/// `amount` is always the magnitude. `signed_amount` carries the direction of flow (negative
/// means money left the account) and, when present, `amount == signed_amount.abs()`. Entries
/// created outside of an import may leave `signed_amount` empty, in which case it is derived
/// from `kind`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    id: String,
    date: String,
    description: String,
    category: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    signed_amount: Option<Decimal>,
    #[serde(rename = "type")]
    kind: TransactionType,
}

impl Transaction {
    /// Creates a transaction from a signed value. `kind` is taken as given because accounting
    /// notation can force an expense regardless of sign.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        signed_amount: Decimal,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount: signed_amount.abs(),
            signed_amount: Some(signed_amount),
            kind,
        }
    }

    /// Creates a transaction from a magnitude and a direction, leaving `signed_amount` empty.
    pub fn from_magnitude(
        id: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount: amount.abs(),
            signed_amount: None,
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The signed value as stored, if any.
    pub fn signed_amount(&self) -> Option<Decimal> {
        self.signed_amount
    }

    /// The signed value, derived from `kind` and `amount` when none was stored.
    pub fn effective_signed_amount(&self) -> Decimal {
        self.signed_amount
            .unwrap_or_else(|| self.kind.sign(self.amount))
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_is_income() {
        use TransactionType::{Expense, Income};
        assert_eq!(TransactionType::from_signed(Decimal::ZERO), Income);
        assert_eq!(TransactionType::from_signed(dec("-0.01")), Expense);
    }

    #[test]
    fn test_new_keeps_magnitude_invariant() {
        let kind = TransactionType::Expense;
        let txn = Transaction::new("1", "2026-01-01", "x", "y", dec("-85.50"), kind);
        assert_eq!(txn.amount(), dec("85.5"));
        assert_eq!(txn.signed_amount(), Some(dec("-85.5")));
    }

    #[test]
    fn test_effective_signed_amount_is_synthesized() {
        let expense =
            Transaction::from_magnitude("1", "", "", "", dec("75"), TransactionType::Expense);
        assert_eq!(expense.effective_signed_amount(), dec("-75"));
        let income =
            Transaction::from_magnitude("2", "", "", "", dec("-75"), TransactionType::Income);
        assert_eq!(income.amount(), dec("75"));
        assert_eq!(income.effective_signed_amount(), dec("75"));
    }

    #[test]
    fn test_type_display_and_parse() {
        assert_eq!(TransactionType::Expense.to_string(), "expense");
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
    }

    #[test]
    fn test_serde_shape() {
        let txn = Transaction::new(
            "txn-0",
            "2026-01-01",
            "Coffee",
            "Food",
            dec("-4.5"),
            TransactionType::Expense,
        );
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["amount"], 4.5);
        assert_eq!(value["signed_amount"], -4.5);

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back.signed_amount(), Some(dec("-4.5")));
    }

    #[test]
    fn test_deserialize_without_signed_amount() {
        let json = r#"{"id":"a","date":"","description":"d","category":"c","amount":10.0,
            "type":"expense"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.signed_amount(), None);
        assert_eq!(txn.effective_signed_amount(), dec("-10"));
    }
}
