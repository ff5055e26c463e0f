use clap::Parser;
use sheet_budget::api::CsvSheet;
use sheet_budget::args::{Args, Command};
use sheet_budget::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Infer(file_args) => {
            let config = Config::load(home).await?;
            let mut sheet = CsvSheet::new(file_args.file());
            commands::infer(&config, &mut sheet, file_args.has_header())
                .await?
                .print()
        }

        Command::Import(file_args) => {
            let config = Config::load(home).await?;
            let mut sheet = CsvSheet::new(file_args.file());
            commands::import(&config, &mut sheet, file_args.has_header())
                .await?
                .print()
        }

        Command::Append(append_args) => {
            let config = Config::load(home).await?;
            let mut sheet = CsvSheet::new(append_args.file().file());
            commands::append(&config, &mut sheet, append_args)
                .await?
                .print()
        }
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => {
            // Without RUST_LOG, apply the level to this crate only. The library and binary share
            // the crate name.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
