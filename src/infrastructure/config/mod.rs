use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "eco_balance.toml";

/// Prefix for environment overrides, e.g. `ECO_BALANCE_DELIMITER=;`
pub const ENV_PREFIX: &str = "ECO_BALANCE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input used when no path is given on the command line
    pub default_input: String,

    /// Single ASCII field delimiter
    pub delimiter: String,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_input: "data_work/features_full.csv".to_string(),
            delimiter: ",".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte().map(|_| ())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' && *byte != b'\r' => {
                Ok(*byte)
            }
            _ => Err(AppError::ValidationError(format!(
                "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            ))),
        }
    }

    pub fn default_input_path(&self) -> PathBuf {
        PathBuf::from(&self.default_input)
    }
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then the TOML file, then `ECO_BALANCE_*` variables.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::NotFound(format!(
                        "config file {}",
                        path.display()
                    )));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        Ok(Self {
            figment: figment.merge(Env::prefixed(ENV_PREFIX)),
        })
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::new(None).unwrap().load().unwrap();
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                default_input = "panel.csv"
                delimiter = ";"
                "#,
            )?;
            jail.set_env("ECO_BALANCE_LOG_FILTER", "debug");

            let config = ConfigService::new(None).unwrap().load().unwrap();
            assert_eq!(config.default_input, "panel.csv");
            assert_eq!(config.delimiter_byte().unwrap(), b';');
            assert_eq!(config.log_filter, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_config_must_exist() {
        Jail::expect_with(|_jail| {
            let err = ConfigService::new(Some(Path::new("missing.toml"))).err().unwrap();
            assert!(matches!(err, AppError::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_delimiter() {
        let config = AppConfig {
            delimiter: "||".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::ValidationError(_))));
    }
}
