//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::api::CsvSheet;
use crate::{utils, Config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small personal budget tab with one row of each interesting amount style and a trailing
/// blank row.
pub(crate) const BUDGET_CSV: &str = r##"Date,Description,Amount,Category
2026-01-01,Grocery shopping at Woolworths,-85.50,Groceries
2026-01-02,Salary,"$5,500.00",Income
2026-01-03,Bus fare,-2.00,
2026-01-04,Bank fee,(10.00),Fees
,,,
"##;

/// The same kind of tab with Indonesian headers and the amount last.
pub(crate) const INDONESIAN_CSV: &str = r##"Tanggal,Keterangan,Kategori,Jumlah
2026-01-05,Belanja bulanan,Makanan,-150000
2026-01-06,Gaji,Pemasukan,8000000
"##;

/// A tab with no header row.
pub(crate) const HEADERLESS_CSV: &str = r##"2026-01-01,-85.50,Grocery shopping
2026-01-02,5500.00,Monthly salary
2026-01-03,-2.00,Bus fare
"##;

/// A tab whose last column is a running balance computed by a formula.
pub(crate) const RUNNING_BALANCE_CSV: &str = r##"Date,Description,Amount,Category,Balance
2026-01-01,Opening,1000.00,Transfer,1000.00
2026-01-02,Rent,-800.00,Housing,200.00
"##;

/// Converts borrowed rows into the owned rows a sheet hands out.
pub(crate) fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Test environment with a home directory in a temp dir. No config file is written, so
/// `config` returns the defaults. Holds TempDir to keep the directory alive for the duration of
/// the test.
pub(crate) struct TestEnv {
    temp_dir: TempDir,
    home: PathBuf,
}

impl TestEnv {
    pub(crate) async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        utils::make_dir(&home).await.unwrap();
        Self { temp_dir, home }
    }

    pub(crate) fn home(&self) -> &Path {
        &self.home
    }

    /// Returns a default Config rooted at this environment's home.
    pub(crate) fn config(&self) -> Config {
        Config::new(self.home())
    }

    /// Writes `data` to a CSV file named `name` and returns a sheet backed by it.
    pub(crate) async fn csv_sheet(&self, name: &str, data: &str) -> CsvSheet {
        let path = self.temp_dir.path().join(name);
        utils::write(&path, data).await.unwrap();
        CsvSheet::new(path)
    }
}
