//! These structs provide the CLI interface for the sheet-budget CLI.

use crate::model::{Amount, TransactionType};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// sheet-budget: make sense of a budget spreadsheet you did not design.
///
/// Reads a tab exported as CSV, works out which columns hold the date, description, amount and
/// category, and turns its rows into signed, typed transactions. It can also append a new
/// transaction to the same file without disturbing columns that hold formulas.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a config file with the given defaults into the home directory.
    ///
    /// Running without a config file is fine; every setting has a default.
    Init(InitArgs),
    /// Print the inferred column mapping of a CSV file as JSON.
    Infer(FileArgs),
    /// Print the transactions in a CSV file as JSON.
    Import(FileArgs),
    /// Append one transaction to a CSV file, laid out the way the file's columns are.
    Append(AppendArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the config file is held. Defaults to ~/.sheet-budget
    #[arg(long, env = "SHEET_BUDGET_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `sheet-budget init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Treat the first row of every file as data rather than detecting a header row.
    #[arg(long)]
    no_header: bool,

    /// A zero-based column index that holds a formula and must never be written. Repeatable.
    #[arg(long = "formula-column")]
    formula_columns: Vec<usize>,

    /// Give imported transactions deterministic ids of the form PREFIX-ROW.
    #[arg(long)]
    id_prefix: Option<String>,

    /// Replace an existing config file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    pub fn new(
        no_header: bool,
        formula_columns: Vec<usize>,
        id_prefix: Option<String>,
        force: bool,
    ) -> Self {
        Self {
            no_header,
            formula_columns,
            id_prefix,
            force,
        }
    }

    /// `Some(false)` when `--no-header` was given, otherwise detection applies.
    pub fn has_header(&self) -> Option<bool> {
        self.no_header.then_some(false)
    }

    pub fn formula_columns(&self) -> &[usize] {
        &self.formula_columns
    }

    pub fn id_prefix(&self) -> Option<&str> {
        self.id_prefix.as_deref()
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// Args shared by commands that read a CSV file.
#[derive(Debug, Parser, Clone)]
pub struct FileArgs {
    /// The CSV file holding the tab.
    #[arg(long)]
    file: PathBuf,

    /// The first row is data, not a header row.
    #[arg(long)]
    no_header: bool,
}

impl FileArgs {
    pub fn new(file: impl Into<PathBuf>, no_header: bool) -> Self {
        Self {
            file: file.into(),
            no_header,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// `Some(false)` when `--no-header` was given, otherwise `None`.
    pub fn has_header(&self) -> Option<bool> {
        self.no_header.then_some(false)
    }
}

/// Args for the `sheet-budget append` command.
#[derive(Debug, Parser, Clone)]
pub struct AppendArgs {
    #[clap(flatten)]
    file: FileArgs,

    /// The amount, e.g. 75, -75, $1,200.00 or (85.50).
    #[arg(long, allow_hyphen_values = true)]
    amount: Amount,

    /// income or expense. When omitted the amount's sign decides, and accounting parentheses
    /// mean expense.
    #[arg(long = "type", value_enum)]
    kind: Option<TransactionType>,

    /// The date to write. Defaults to today as YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<String>,

    /// A zero-based column index that must not be written, in addition to the configured ones.
    /// Repeatable.
    #[arg(long = "formula-column")]
    formula_columns: Vec<usize>,
}

impl AppendArgs {
    pub fn new(file: FileArgs, amount: Amount) -> Self {
        Self {
            file,
            amount,
            kind: None,
            date: None,
            description: None,
            category: None,
            formula_columns: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_formula_columns(mut self, columns: Vec<usize>) -> Self {
        self.formula_columns = columns;
        self
    }

    pub fn file(&self) -> &FileArgs {
        &self.file
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The explicit type, or the one implied by the amount.
    pub fn kind(&self) -> TransactionType {
        match self.kind {
            Some(kind) => kind,
            None if self.amount.is_accounting_negative() => TransactionType::Expense,
            None => TransactionType::from_signed(self.amount.value()),
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn formula_columns(&self) -> &[usize] {
        &self.formula_columns
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".sheet-budget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SHEET_BUDGET_HOME instead of relying on the default \
                home directory.",
            );
            PathBuf::from(".sheet-budget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
