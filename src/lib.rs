pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

pub use crate::application::{ColumnDeriver, DeriveReport};
pub use crate::domain::dataset::Dataset;
pub use crate::domain::error::{AppError, Result};

use crate::infrastructure::logging::init_tracing;
use crate::interfaces::cli::Cli;

pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_filter);

    match cli.execute(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Derivation failed");
            ExitCode::FAILURE
        }
    }
}
