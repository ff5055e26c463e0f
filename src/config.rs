//! Configuration file handling.
//!
//! The configuration file is stored at `$SHEET_BUDGET_HOME/config.json` and holds the defaults
//! used when reading and appending to a budget sheet. Every setting is optional and the file
//! itself may be absent, in which case the defaults apply.

use crate::{utils, Result};
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "sheet-budget";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SHEET_BUDGET_HOME` and from there it loads `$SHEET_BUDGET_HOME/config.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates a configuration rooted at `home` with default settings. Nothing is written until
    /// [`Config::save`] is called.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let root = home.into();
        Self {
            config_path: root.join(CONFIG_JSON),
            root,
            config_file: ConfigFile::default(),
        }
    }

    /// Loads `$SHEET_BUDGET_HOME/config.json`. When the file does not exist the defaults are
    /// returned.
    ///
    /// # Errors
    /// - The file exists but cannot be read or parsed.
    /// - The file belongs to a different application.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(home);
        if !config.config_path.is_file() {
            debug!(
                "No config file at '{}', using defaults",
                config.config_path.display()
            );
            return Ok(config);
        }
        config.config_file = ConfigFile::load(&config.config_path).await?;
        Ok(config)
    }

    /// Creates the home directory if needed and writes the config file, replacing any existing
    /// one.
    pub async fn save(&self) -> Result<()> {
        utils::make_dir(&self.root)
            .await
            .context("Unable to create the home directory")?;
        self.config_file.save(&self.config_path).await
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Overrides header detection when set.
    pub fn has_header(&self) -> Option<bool> {
        self.config_file.has_header
    }

    /// Columns that are never written by `append`.
    pub fn formula_columns(&self) -> &BTreeSet<usize> {
        &self.config_file.formula_columns
    }

    /// When set, imported transactions get deterministic `{prefix}-{row}` ids.
    pub fn id_prefix(&self) -> Option<&str> {
        self.config_file.id_prefix.as_deref()
    }

    pub fn with_has_header(mut self, has_header: Option<bool>) -> Self {
        self.config_file.has_header = has_header;
        self
    }

    pub fn with_formula_columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.config_file.formula_columns = columns.into_iter().collect();
        self
    }

    pub fn with_id_prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.config_file.id_prefix = prefix.map(Into::into);
        self
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "sheet-budget",
///   "config_version": 1,
///   "has_header": true,
///   "formula_columns": [4, 5],
///   "id_prefix": "budget"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "sheet-budget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Whether the first row is a header row. Detected from the data when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_header: Option<bool>,

    /// Zero-based indices of columns holding live formulas.
    #[serde(default)]
    formula_columns: BTreeSet<usize>,

    /// Prefix for deterministic transaction ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_prefix: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            has_header: None,
            formula_columns: BTreeSet::new(),
            id_prefix: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if `app_name` is wrong.
    async fn load(path: &Path) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }
}
