use crate::api::Sheet;
use crate::commands::infer::read_mapping;
use crate::commands::Out;
use crate::model::{Amount, ColumnMapping, Transaction};
use crate::normalize::RowIndexIds;
use crate::{parse_transactions, parse_transactions_with, Config, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// The result of an import: the mapping that was used and the transactions it produced.
#[derive(Debug, Clone, Serialize)]
pub struct Imported {
    mapping: ColumnMapping,
    transactions: Vec<Transaction>,
}

impl Imported {
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Reads the sheet, infers its mapping and parses every data row into a transaction.
///
/// Ids are `{id_prefix}-{row}` when the config sets a prefix and globally unique otherwise.
pub async fn import(
    config: &Config,
    sheet: &mut dyn Sheet,
    has_header: Option<bool>,
) -> Result<Out<Imported>> {
    let (grid, mapping) = read_mapping(config, sheet, has_header).await?;
    let rows = grid.data();
    let transactions = match config.id_prefix() {
        Some(prefix) => {
            let ids = RowIndexIds::new(prefix);
            parse_transactions_with(rows, &mapping, false, &ids)
        }
        None => parse_transactions(rows, &mapping, false),
    };

    let expenses = transactions.iter().filter(|t| t.is_expense()).count();
    let net = match net_total(&transactions) {
        Some(net) => Amount::new(net).to_string(),
        None => {
            warn!("The net total of the imported transactions overflows");
            "unavailable".to_string()
        }
    };
    let message = format!(
        "Imported {} transactions ({} expenses, {} income), net {}",
        transactions.len(),
        expenses,
        transactions.len() - expenses,
        net,
    );

    Ok(Out::new(
        message,
        Imported {
            mapping,
            transactions,
        },
    ))
}

/// The sum of the signed amounts, or `None` when it does not fit in a `Decimal`.
fn net_total(transactions: &[Transaction]) -> Option<Decimal> {
    transactions
        .iter()
        .map(Transaction::effective_signed_amount)
        .try_fold(Decimal::ZERO, |net, amount| net.checked_add(amount))
}
