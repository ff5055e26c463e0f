//! Implements the `Sheet` trait with rows held in memory.

use crate::api::{load_csv, Sheet};
use crate::model::Cell;
use crate::Result;

/// A tab held in memory. Appended rows are added to the tab as display strings and are also
/// kept, as written, in `appended`.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
    appended: Vec<Vec<Cell>>,
}

impl MemorySheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            appended: Vec::new(),
        }
    }

    /// Creates a `MemorySheet` seeded from CSV-formatted text.
    pub fn from_csv(csv_data: &str) -> Result<Self> {
        Ok(Self::new(load_csv(csv_data)?))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The rows passed to `append`, in order.
    pub fn appended(&self) -> &[Vec<Cell>] {
        &self.appended
    }
}

#[async_trait::async_trait]
impl Sheet for MemorySheet {
    async fn get(&mut self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    async fn append(&mut self, row: &[Cell]) -> Result<()> {
        self.rows.push(row.iter().map(|cell| cell.to_string()).collect());
        self.appended.push(row.to_vec());
        Ok(())
    }
}
