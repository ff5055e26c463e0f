use crate::api::Sheet;
use crate::commands::Out;
use crate::model::{ColumnMapping, Grid, Slot};
use crate::{infer_schema, Config, Result};
use anyhow::Context;
use tracing::debug;

/// Reads the sheet and prints the inferred `ColumnMapping`.
///
/// `has_header` overrides the config, which in turn overrides detection.
pub async fn infer(
    config: &Config,
    sheet: &mut dyn Sheet,
    has_header: Option<bool>,
) -> Result<Out<ColumnMapping>> {
    let (_, mapping) = read_mapping(config, sheet, has_header).await?;
    let mapped: Vec<String> = Slot::ALL
        .into_iter()
        .filter_map(|slot| mapping.get(slot).map(|ix| format!("{slot}={ix}")))
        .collect();
    let message = if mapped.is_empty() {
        "No columns could be mapped".to_string()
    } else {
        format!("Mapped {}", mapped.join(", "))
    };
    Ok(Out::new(message, mapping))
}

/// Fetches the grid once and infers its mapping.
pub(super) async fn read_mapping(
    config: &Config,
    sheet: &mut dyn Sheet,
    has_header: Option<bool>,
) -> Result<(Grid, ColumnMapping)> {
    let rows = sheet.get().await?;
    let grid = Grid::new(rows, has_header.or(config.has_header()))
        .context("The sheet cannot be read as a table")?;
    let mapping = infer_schema(&grid.headers(), grid.data());
    debug!("Inferred {mapping:?}");
    Ok((grid, mapping))
}
