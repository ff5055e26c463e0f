use crate::api::Sheet;
use crate::args::AppendArgs;
use crate::commands::infer::read_mapping;
use crate::commands::Out;
use crate::model::{Cell, Transaction, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
use crate::normalize::{IdGenerator, RowIndexIds, UniqueIds};
use crate::{build_append_row, Config, Result};
use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// The transaction that was appended and the row that was written for it.
#[derive(Debug, Clone, Serialize)]
pub struct Appended {
    transaction: Transaction,
    row: Vec<Cell>,
}

impl Appended {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn row(&self) -> &[Cell] {
        &self.row
    }
}

/// Infers the sheet's mapping, lays the transaction described by `args` out as a row of the
/// sheet's width and appends it.
///
/// Columns listed in the config's `formula_columns` or in `args` are left empty.
///
/// # Errors
/// - The sheet cannot be read or written.
/// - None of the sheet's columns could be mapped, so the row would be blank.
pub async fn append(
    config: &Config,
    sheet: &mut dyn Sheet,
    args: &AppendArgs,
) -> Result<Out<Appended>> {
    let (grid, mapping) = read_mapping(config, sheet, args.file().has_header()).await?;
    if mapping.amount_column().is_none() {
        warn!("No amount column was found, the amount will not be written");
    }

    let row_ix = grid.data().len();
    let id = match config.id_prefix() {
        Some(prefix) => RowIndexIds::new(prefix).id_for(row_ix),
        None => UniqueIds::new().id_for(row_ix),
    };
    let transaction = Transaction::from_magnitude(
        id,
        args.date().unwrap_or_default(),
        args.description().unwrap_or(DEFAULT_DESCRIPTION),
        args.category().unwrap_or(DEFAULT_CATEGORY),
        args.amount().magnitude(),
        args.kind(),
    );

    let formula_columns: BTreeSet<usize> = config
        .formula_columns()
        .iter()
        .chain(args.formula_columns())
        .copied()
        .collect();
    let column_count = mapping.column_count();
    let row = build_append_row(&mapping, &transaction, column_count, &formula_columns);
    if row.iter().all(Cell::is_empty) {
        bail!("None of the sheet's columns could be mapped, nothing was appended");
    }

    sheet.append(&row).await?;
    Ok(Out::new(
        format!("Appended {} of {}", transaction.kind(), args.amount()),
        Appended { transaction, row },
    ))
}
