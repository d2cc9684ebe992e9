//! Configuration management for launchdash.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "launchdash";

/// Default launch data file, resolved against the working directory.
const DATA_FILE_NAME: &str = "spacex_launch_dash.csv";

/// Upper bound on labelled payload slider marks.
pub const MAX_SLIDER_MARKS: usize = 1000;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LAUNCHDASH_`)
/// 2. TOML config file at `~/.config/launchdash/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Launch data configuration.
    pub data: DataConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Dashboard control configuration.
    pub dashboard: DashboardConfig,
}

/// Launch data configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the CSV file.
    /// Defaults to `spacex_launch_dash.csv` in the working directory.
    pub path: Option<PathBuf>,
    /// Header names of the columns the dashboard reads.
    pub columns: ColumnConfig,
}

/// Header names of the launch data columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Launch site column.
    pub site: String,
    /// Outcome flag column (0 or 1).
    pub outcome: String,
    /// Payload mass column, in kilograms.
    pub payload: String,
    /// Booster category column.
    pub booster_category: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// CORS allowed origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

/// Dashboard page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page heading.
    pub title: String,
    /// Lowest value selectable on the payload slider.
    pub slider_min: f64,
    /// Highest value selectable on the payload slider.
    pub slider_max: f64,
    /// Slider step.
    pub slider_step: f64,
    /// Distance between labelled slider marks.
    pub mark_interval: f64,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            site: "Launch Site".to_string(),
            outcome: "class".to_string(),
            payload: "Payload Mass (kg)".to_string(),
            booster_category: "Booster Version Category".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_min: 0.0,
            slider_max: 10_000.0,
            slider_step: 1_000.0,
            mark_interval: 2_500.0,
        }
    }
}

impl ColumnConfig {
    /// The configured column names, in a fixed order.
    #[must_use]
    pub fn names(&self) -> [&str; 4] {
        [
            &self.site,
            &self.outcome,
            &self.payload,
            &self.booster_category,
        ]
    }
}

impl DashboardConfig {
    /// Number of labelled marks from `slider_min` up to `slider_max`, one
    /// every `mark_interval`.
    ///
    /// Returns `None` when the values are not finite, the interval is not
    /// positive, or the span would need more than [`MAX_SLIDER_MARKS`] marks.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn mark_count(&self) -> Option<usize> {
        let values = [self.slider_min, self.slider_max, self.mark_interval];
        if values.iter().any(|v| !v.is_finite())
            || self.mark_interval <= 0.0
            || self.slider_max < self.slider_min
        {
            return None;
        }

        let intervals = ((self.slider_max - self.slider_min) / self.mark_interval).floor();
        if !intervals.is_finite() || intervals >= MAX_SLIDER_MARKS as f64 {
            return None;
        }
        Some(intervals as usize + 1)
    }
}

impl ServerConfig {
    /// Get the socket address string.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists; the default path when `None`)
    /// 3. Environment variables (prefixed with `LAUNCHDASH_`, nested keys
    ///    separated by `__`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("LAUNCHDASH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let dashboard = &self.dashboard;
        let numbers = [
            ("slider_min", dashboard.slider_min),
            ("slider_max", dashboard.slider_max),
            ("slider_step", dashboard.slider_step),
            ("mark_interval", dashboard.mark_interval),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::config_validation(format!(
                "{name} must be a finite number, got {value}"
            )));
        }

        if dashboard.slider_min >= dashboard.slider_max {
            return Err(Error::config_validation(format!(
                "slider_min ({}) must be less than slider_max ({})",
                dashboard.slider_min, dashboard.slider_max
            )));
        }

        if dashboard.slider_step <= 0.0 {
            return Err(Error::config_validation(
                "slider_step must be greater than 0",
            ));
        }

        if dashboard.mark_interval <= 0.0 {
            return Err(Error::config_validation(
                "mark_interval must be greater than 0",
            ));
        }

        if dashboard.mark_count().is_none() {
            return Err(Error::config_validation(format!(
                "mark_interval {} yields more than {MAX_SLIDER_MARKS} slider marks between {} and {}",
                dashboard.mark_interval, dashboard.slider_min, dashboard.slider_max
            )));
        }

        let names = self.data.columns.names();
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::config_validation("column names must not be empty"));
        }
        let distinct: HashSet<&str> = names.iter().copied().collect();
        if distinct.len() != names.len() {
            return Err(Error::config_validation("column names must be distinct"));
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.data.path.is_none());
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.dashboard.title, "SpaceX Launch Records Dashboard");
    }

    #[test]
    fn test_default_columns() {
        let columns = ColumnConfig::default();

        assert_eq!(columns.site, "Launch Site");
        assert_eq!(columns.outcome, "class");
        assert_eq!(columns.payload, "Payload Mass (kg)");
        assert_eq!(columns.booster_category, "Booster Version Category");
    }

    #[test]
    fn test_default_dashboard_config() {
        let dashboard = DashboardConfig::default();

        assert!((dashboard.slider_min - 0.0).abs() < f64::EPSILON);
        assert!((dashboard.slider_max - 10_000.0).abs() < f64::EPSILON);
        assert!((dashboard.slider_step - 1_000.0).abs() < f64::EPSILON);
        assert!((dashboard.mark_interval - 2_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(server.socket_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_slider() {
        let mut config = Config::default();
        config.dashboard.slider_min = 5000.0;
        config.dashboard.slider_max = 100.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider_min"));
    }

    #[test]
    fn test_validate_zero_step() {
        let mut config = Config::default();
        config.dashboard.slider_step = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider_step"));
    }

    #[test]
    fn test_validate_zero_mark_interval() {
        let mut config = Config::default();
        config.dashboard.mark_interval = -1.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("mark_interval"));
    }

    #[test]
    fn test_validate_non_finite_slider() {
        let mut config = Config::default();
        config.dashboard.slider_min = f64::NAN;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider_min must be a finite number"));

        let mut config = Config::default();
        config.dashboard.slider_max = f64::INFINITY;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider_max must be a finite number"));

        let mut config = Config::default();
        config.dashboard.mark_interval = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_interval_lost_in_span_magnitude() {
        // 1e20 + 1.0 == 1e20 in f64
        let mut config = Config::default();
        config.dashboard.slider_min = 1e20;
        config.dashboard.slider_max = 2e20;
        config.dashboard.mark_interval = 1.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider marks"));
    }

    #[test]
    fn test_validate_too_many_marks() {
        let mut config = Config::default();
        config.dashboard.mark_interval = 1e-9;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("more than 1000 slider marks"));
    }

    #[test]
    fn test_mark_count() {
        let dashboard = DashboardConfig::default();
        assert_eq!(dashboard.mark_count(), Some(5));

        let partial = DashboardConfig {
            slider_max: 6000.0,
            ..DashboardConfig::default()
        };
        assert_eq!(partial.mark_count(), Some(3));

        let limit = DashboardConfig {
            slider_max: 999.0,
            mark_interval: 1.0,
            ..DashboardConfig::default()
        };
        assert_eq!(limit.mark_count(), Some(MAX_SLIDER_MARKS));

        let zero = DashboardConfig {
            mark_interval: 0.0,
            ..DashboardConfig::default()
        };
        assert_eq!(zero.mark_count(), None);
    }

    #[test]
    fn test_validate_empty_column() {
        let mut config = Config::default();
        config.data.columns.site = " ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_validate_duplicate_columns() {
        let mut config = Config::default();
        config.data.columns.outcome = "Launch Site".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("distinct"));
    }

    #[test]
    fn test_data_path_default() {
        let config = Config::default();
        assert_eq!(config.data_path(), PathBuf::from("spacex_launch_dash.csv"));
    }

    #[test]
    fn test_data_path_custom() {
        let mut config = Config::default();
        config.data.path = Some(PathBuf::from("/srv/launches.csv"));
        assert_eq!(config.data_path(), PathBuf::from("/srv/launches.csv"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("launchdash"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            // Loading from a nonexistent path should work (uses defaults)
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[data]
path = "/data/launches.csv"

[data.columns]
site = "site"

[server]
port = 9090

[dashboard]
title = "Launches"
"#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.data_path(), PathBuf::from("/data/launches.csv"));
            assert_eq!(config.data.columns.site, "site");
            assert_eq!(config.data.columns.outcome, "class");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.dashboard.title, "Launches");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[data.columns]
site = "site"
outcome = "launch_class"

[server]
port = 9090
"#,
            )?;
            jail.set_env("LAUNCHDASH_SERVER__PORT", "9000");
            jail.set_env("LAUNCHDASH_DATA__COLUMNS__SITE", "Site Name");
            jail.set_env("LAUNCHDASH_DATA__COLUMNS__BOOSTER_CATEGORY", "Booster");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;

            // Environment beats the file
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.data.columns.site, "Site Name");
            // Underscores inside a field name are not a nesting separator
            assert_eq!(config.data.columns.booster_category, "Booster");
            // File beats the defaults
            assert_eq!(config.data.columns.outcome, "launch_class");
            // Untouched keys keep their defaults
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.data.columns.payload, "Payload Mass (kg)");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[dashboard]\nslider_step = 0.0\n")?;

            let err = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slider_max"));
        assert!(json.contains("Payload Mass (kg)"));
    }

    #[test]
    fn test_server_config_deserialize() {
        let json = r#"{"port": 8080}"#;
        let server: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(server.port, 8080);
        assert_eq!(server.host, "127.0.0.1");
        assert!(server.cors_origins.is_empty());
    }
}
