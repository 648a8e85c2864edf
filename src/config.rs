// src/config.rs

use config::{Config, ConfigError, File};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SpreadsheetConfig {
    /// Document name, resolved to an id through Drive when `id` is unset.
    pub name: String,
    pub id: Option<String>,
    pub access_token: String,
    pub sheets_base_url: String,
    pub drive_base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WorksheetNames {
    pub sales: String,
    pub surplus: String,
    pub stock: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// How many of the latest sales rows feed the average.
    pub window: usize,
    /// Safety margin applied to the average, 1.1 pads by 10%.
    pub margin: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub directory: String,
    pub file_prefix: String,
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub spreadsheet: SpreadsheetConfig,
    pub worksheets: WorksheetNames,
    pub forecast: ForecastConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("Settings").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("spreadsheet.name", "love_sandwiches")?
            .set_default("spreadsheet.sheets_base_url", "https://sheets.googleapis.com")?
            .set_default("spreadsheet.drive_base_url", "https://www.googleapis.com")?
            .set_default("worksheets.sales", "sales")?
            .set_default("worksheets.surplus", "surplus")?
            .set_default("worksheets.stock", "stock")?
            .set_default("forecast.window", 5)?
            .set_default("forecast.margin", "1.1")?
            .set_default("logging.directory", "logs")?
            .set_default("logging.file_prefix", "love_sandwiches.log")?
            .set_default("logging.filter", "info")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.spreadsheet.access_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "spreadsheet.access_token must not be empty".to_string(),
            ));
        }
        if self.forecast.window == 0 {
            return Err(ConfigError::Message(
                "forecast.window must be at least 1".to_string(),
            ));
        }
        if self.forecast.margin < Decimal::ONE {
            return Err(ConfigError::Message(format!(
                "forecast.margin must be at least 1, got {}",
                self.forecast.margin
            )));
        }
        Ok(())
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 5,
            margin: Decimal::new(11, 1),
        }
    }
}

impl Default for WorksheetNames {
    fn default() -> Self {
        Self {
            sales: "sales".to_string(),
            surplus: "surplus".to_string(),
            stock: "stock".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(overrides: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let mut builder = AppConfig::defaults(Config::builder())?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn defaults_fill_everything_but_the_token() {
        let config = load(&[("spreadsheet.access_token", "token")]).unwrap();

        assert_eq!(config.spreadsheet.name, "love_sandwiches");
        assert!(config.spreadsheet.id.is_none());
        assert_eq!(config.worksheets, WorksheetNames::default());
        assert_eq!(config.forecast.window, 5);
        assert_eq!(config.forecast.margin, Decimal::new(11, 1));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn missing_token_is_rejected() {
        assert!(load(&[]).is_err());
        assert!(load(&[("spreadsheet.access_token", "  ")]).is_err());
    }

    #[test]
    fn forecast_bounds_are_checked() {
        assert!(load(&[
            ("spreadsheet.access_token", "token"),
            ("forecast.window", "0"),
        ])
        .is_err());
        assert!(load(&[
            ("spreadsheet.access_token", "token"),
            ("forecast.margin", "0.9"),
        ])
        .is_err());
    }
}
