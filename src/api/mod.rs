//! The seam between the pure core and wherever a tab's rows are stored.
//!
//! A [`Sheet`] hands out the rows of one tab as display strings and accepts new rows at the
//! bottom. [`CsvSheet`] backs a tab with a CSV file and [`MemorySheet`] keeps it in memory.

mod csv_sheet;
mod memory_sheet;

use crate::model::Cell;
use crate::Result;
use std::io::Cursor;

pub use csv_sheet::CsvSheet;
pub use memory_sheet::MemorySheet;

/// One tab of a budget spreadsheet.
#[async_trait::async_trait]
pub trait Sheet: Send {
    /// Returns every row of the tab, header row included, as display strings.
    async fn get(&mut self) -> Result<Vec<Vec<String>>>;

    /// Adds `row` below the last row of the tab.
    async fn append(&mut self, row: &[Cell]) -> Result<()>;
}

/// Loads rows from CSV-formatted text. Rows may have different lengths.
pub(crate) fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Encodes one row as a CSV line, including the line terminator.
pub(crate) fn encode_row(row: &[Cell]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to encode row as CSV: {}", e.error()))
}
