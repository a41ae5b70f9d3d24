//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Margin indicator configuration.
    #[serde(default)]
    pub margins: MarginConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Thresholds used to classify margins and hours.
#[derive(Debug, Clone, Deserialize)]
pub struct MarginConfig {
    /// Percentage points under the theoretical margin still rated as a warning.
    #[serde(default = "default_margin_warning_band")]
    pub margin_warning_band: Decimal,
    /// Ratio of expected hours under which an overrun is only a warning.
    #[serde(default = "default_hours_warning_ratio")]
    pub hours_warning_ratio: Decimal,
    /// Currency used for reported amounts.
    #[serde(default)]
    pub currency: Currency,
    /// Projects whose figures are loaded at the same time by a report.
    #[serde(default = "default_report_concurrency")]
    pub report_concurrency: usize,
}

fn default_margin_warning_band() -> Decimal {
    Decimal::new(7, 0)
}

fn default_hours_warning_ratio() -> Decimal {
    Decimal::new(11, 1) // 1.1
}

fn default_report_concurrency() -> usize {
    2
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            margin_warning_band: default_margin_warning_band(),
            hours_warning_ratio: default_hours_warning_ratio(),
            currency: Currency::default(),
            report_concurrency: default_report_concurrency(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `VT__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_margin_config_defaults() {
        let config = MarginConfig::default();
        assert_eq!(config.margin_warning_band, dec!(7));
        assert_eq!(config.hours_warning_ratio, dec!(1.1));
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.report_concurrency, 2);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("VT__DATABASE__URL", Some("postgres://vt:vt@localhost:5432/vt")),
                ("VT__MARGINS__CURRENCY", Some("CHF")),
                ("RUN_MODE", Some("test-env-only")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://vt:vt@localhost:5432/vt");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
                assert_eq!(config.margins.currency, Currency::Chf);
                assert_eq!(config.margins.margin_warning_band, dec!(7));
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("VT__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("test-env-only")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
