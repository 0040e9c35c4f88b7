//! Configuration management for the heat health assistant
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::HeatHealthError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the heat health assistant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatHealthConfig {
    /// Weather provider (OpenWeatherMap) settings
    pub weather: WeatherConfig,
    /// Advice provider (Gemini) settings
    pub advice: AdviceConfig,
    /// Places provider (Geoapify) settings
    pub places: PlacesConfig,
    /// Outbound HTTP client settings
    pub http: HttpConfig,
    /// Inbound web server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the weather API
    pub base_url: String,
}

/// Generative text API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Base URL for the generative text API
    pub base_url: String,
    /// Model used for `generateContent`
    pub model: String,
}

/// Places search API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Geoapify API key
    pub api_key: Option<String>,
    /// Base URL for the places API
    pub base_url: String,
    /// Search radius in meters
    pub radius_meters: u32,
    /// Maximum number of results per category
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds; the client default applies when unset
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the front end assets served at `/`
    pub static_dir: String,
    /// PEM certificate and key, only used with the `tls` feature
    pub tls_cert: Option<String>,
    pub tls_key: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_advice_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_advice_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_places_base_url() -> String {
    "https://api.geoapify.com".to_string()
}

fn default_radius_meters() -> u32 {
    5000
}

fn default_places_limit() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("HeatHealth/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_advice_base_url(),
            model: default_advice_model(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            radius_meters: default_radius_meters(),
            limit: default_places_limit(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl HeatHealthConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // HEATHEALTH_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("HEATHEALTH")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: HeatHealthConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("heat-health").join("config.toml"))
    }

    /// Apply default values to fields left blank in the sources
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.advice.base_url.is_empty() {
            self.advice.base_url = default_advice_base_url();
        }
        if self.advice.model.is_empty() {
            self.advice.model = default_advice_model();
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Fail unless every upstream API key is present.
    ///
    /// Kept apart from [`validate`](Self::validate) so the offline routes can
    /// run without credentials.
    pub fn require_credentials(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("weather.api_key", &self.weather.api_key),
            ("advice.api_key", &self.advice.api_key),
            ("places.api_key", &self.places.api_key),
        ]
        .into_iter()
        .filter(|(_, key)| key.as_deref().is_none_or(|k| k.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(HeatHealthError::config(format!(
                "Missing API keys: {}. Set them in the config file or as HEATHEALTH_<SECTION>__API_KEY.",
                missing.join(", ")
            ))
            .into())
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if let Some(timeout) = self.http.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(HeatHealthError::config(
                    "HTTP timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        if !(1..=50_000).contains(&self.places.radius_meters) {
            return Err(HeatHealthError::config(
                "Places search radius must be between 1 and 50000 m",
            )
            .into());
        }

        if !(1..=20).contains(&self.places.limit) {
            return Err(HeatHealthError::config("Places limit must be between 1 and 20").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HeatHealthError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HeatHealthError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("weather", &self.weather.base_url),
            ("advice", &self.advice.base_url),
            ("places", &self.places.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(HeatHealthError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that read `HEATHEALTH_*` variables through `load_from_path`
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = HeatHealthConfig::default();
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org");
        assert_eq!(config.advice.model, "gemini-2.5-flash");
        assert_eq!(config.places.radius_meters, 5000);
        assert_eq!(config.places.limit, 5);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(config.http.timeout_seconds.is_none());
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_require_credentials_lists_missing_keys() {
        let mut config = HeatHealthConfig::default();
        config.weather.api_key = Some("weather_key".to_string());
        config.places.api_key = Some("  ".to_string());

        let err = config.require_credentials().unwrap_err().to_string();
        assert!(err.contains("advice.api_key"));
        assert!(err.contains("places.api_key"));
        assert!(!err.contains("weather.api_key"));
    }

    #[test]
    fn test_require_credentials_ok() {
        let mut config = HeatHealthConfig::default();
        config.weather.api_key = Some("a".to_string());
        config.advice.api_key = Some("b".to_string());
        config.places.api_key = Some("c".to_string());
        assert!(config.require_credentials().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = HeatHealthConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = HeatHealthConfig::default();
        config.http.timeout_seconds = Some(500);
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTP timeout"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = HeatHealthConfig::default();
        config.places.base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("places base URL"));
    }

    #[rstest]
    #[case::zero_radius(0, 5)]
    #[case::radius_too_large(50_001, 5)]
    #[case::zero_limit(5000, 0)]
    #[case::limit_too_large(5000, 21)]
    fn test_places_ranges_rejected(#[case] radius_meters: u32, #[case] limit: u32) {
        let mut config = HeatHealthConfig::default();
        config.places.radius_meters = radius_meters;
        config.places.limit = limit;
        config.apply_defaults();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_variable_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let missing_file = dir.path().join("absent.toml");

        // SAFETY: ENV_LOCK keeps other config-loading tests out while these are set
        unsafe {
            std::env::set_var("HEATHEALTH_WEATHER__API_KEY", "env_weather_key");
            std::env::set_var("HEATHEALTH_PLACES__LIMIT", "10");
        }

        let result = HeatHealthConfig::load_from_path(Some(missing_file));

        // SAFETY: as above
        unsafe {
            std::env::remove_var("HEATHEALTH_WEATHER__API_KEY");
            std::env::remove_var("HEATHEALTH_PLACES__LIMIT");
        }

        let config = result.unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("env_weather_key"));
        assert_eq!(config.places.limit, 10);
        assert_eq!(config.places.radius_meters, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
api_key = "file_weather_key"

[places]
radius_meters = 2500

[server]
port = 8080
"#
        )
        .unwrap();

        let config = HeatHealthConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("file_weather_key"));
        assert_eq!(config.places.radius_meters, 2500);
        assert_eq!(config.places.limit, 5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.advice.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_config_path_generation() {
        let path = HeatHealthConfig::get_config_path();
        if let Some(path) = path {
            assert!(path.to_string_lossy().contains("heat-health"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
