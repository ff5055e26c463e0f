use crate::api::{encode_row, load_csv, Sheet};
use crate::model::Cell;
use crate::{utils, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::trace;

/// A tab stored as a CSV file. The whole file is the tab; the first record is its header row
/// when it has one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl Sheet for CsvSheet {
    async fn get(&mut self) -> Result<Vec<Vec<String>>> {
        trace!("Reading rows from {}", self.path.display());
        let data = utils::read(&self.path).await?;
        load_csv(&data).with_context(|| format!("Unable to parse CSV at {}", self.path.display()))
    }

    async fn append(&mut self, row: &[Cell]) -> Result<()> {
        trace!("Appending a row of {} cells to {}", row.len(), self.path.display());
        let existing = utils::read(&self.path).await?;
        let mut bytes = Vec::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            bytes.push(b'\n');
        }
        bytes.extend(encode_row(row)?);
        utils::append(&self.path, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_reads_all_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.csv");
        utils::write(&path, "Date,Description,Amount\n2026-01-01,Coffee,-4.50\n")
            .await
            .unwrap();

        let mut sheet = CsvSheet::new(&path);
        let rows = sheet.get().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["2026-01-01", "Coffee", "-4.50"]);
    }

    #[tokio::test]
    async fn test_append_adds_a_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("budget.csv");
        utils::write(&path, "Date,Amount").await.unwrap();

        let mut sheet = CsvSheet::new(&path);
        sheet
            .append(&[Cell::from("2026-01-15"), Cell::from(Decimal::from(-75))])
            .await
            .unwrap();

        let content = utils::read(&path).await.unwrap();
        assert_eq!(content, "Date,Amount\n2026-01-15,-75\n");
        assert_eq!(sheet.get().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut sheet = CsvSheet::new(dir.path().join("nope.csv"));
        assert!(sheet.get().await.is_err());
        assert!(sheet.append(&[Cell::from("x")]).await.is_err());
    }
}
