//! Application configuration

use anyhow::Context;
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Rendering of accepted readings on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pipe-delimited wire format
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Top-level configuration of the `car-dashboard` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub output: OutputFormat,
    pub validation: ValidationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            output: OutputFormat::Text,
            validation: ValidationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the optional config file, then `DASHBOARD__*` environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let builder = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("DASHBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder).with_context(|| format!("loading configuration ({path})"))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let app: AppConfig = builder.build()?.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Reject thresholds the pipeline cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validation
            .check()
            .context("invalid [validation] section")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::Transmission;

    fn from_toml(raw: &str) -> anyhow::Result<AppConfig> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml));
        AppConfig::from_builder(builder)
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let app = from_toml(
            r#"
            output = "json"

            [validation]
            transmission = "manual"
            max_speed_delta = 8
            "#,
        )
        .unwrap();

        assert_eq!(app.output, OutputFormat::Json);
        assert_eq!(app.log_format, LogFormat::Text);
        assert_eq!(app.validation.transmission, Transmission::Manual);
        assert_eq!(app.validation.max_speed_delta, 8);
        assert_eq!(app.validation.history_len, 5);
        assert_eq!(app.validation.speed_range, (-20, 350));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(from_toml("[validation]\nhistory_len = 0").is_err());
        assert!(from_toml("[validation]\nspeed_range = [100, 0]").is_err());
        assert!(from_toml("[validation]\nacceleration_threshold = -2.5").is_err());
        assert!(from_toml("[validation]\nmax_speed_delta = -1").is_err());
    }

    #[test]
    fn test_unknown_transmission_rejected() {
        assert!(from_toml("[validation]\ntransmission = \"cvt\"").is_err());
    }
}
