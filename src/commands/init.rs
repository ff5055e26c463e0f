use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::{bail, Context};
use std::path::Path;

/// Writes `$SHEET_BUDGET_HOME/config.json` with the settings in `args`, creating the home
/// directory if needed.
///
/// # Errors
/// - A config file already exists and `--force` was not given.
/// - Any file operation fails.
pub async fn init(home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::new(home)
        .with_has_header(args.has_header())
        .with_formula_columns(args.formula_columns().iter().copied())
        .with_id_prefix(args.id_prefix());

    if config.config_path().is_file() && !args.force() {
        bail!(
            "A config file already exists at '{}', use --force to replace it",
            config.config_path().display()
        );
    }

    config
        .save()
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!("Wrote {}", config.config_path().display()).into())
}
