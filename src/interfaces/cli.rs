use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::application::{ColumnDeriver, DeriveReport};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::{AppConfig, ConfigService};

/// Add eco_balance_percap and eco_balance_total to a features CSV
#[derive(Debug, Parser)]
#[command(name = "eco-balance", version, about)]
pub struct Cli {
    /// Input CSV (defaults to the configured default_input)
    pub input: Option<PathBuf>,

    /// Write here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML config file (default: ./eco_balance.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Field delimiter, overrides the config
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Merge command-line flags over the loaded config
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = ConfigService::new(self.config.as_deref())?.load()?;
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = delimiter.clone();
            config.validate()?;
        }
        Ok(config)
    }

    pub fn execute(&self, config: &AppConfig) -> Result<DeriveReport> {
        let input = self
            .input
            .clone()
            .unwrap_or_else(|| config.default_input_path());

        let deriver = ColumnDeriver::new(config.delimiter_byte()?);
        let (_, report) = deriver.derive_with_report(&input, self.output.as_deref())?;

        if let Some(path) = &self.report {
            write_report(&report, path)?;
            info!("Report written to: {}", path.display());
        }

        Ok(report)
    }
}

fn write_report(report: &DeriveReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::IoError(format!("Failed to serialize report: {}", e)))?;
    fs::write(path, json)?;
    Ok(())
}
