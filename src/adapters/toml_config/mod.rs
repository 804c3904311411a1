// TOML config adapter - Layered configuration from defaults, file and environment

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::pexels_http::{PexelsAdapter, API_KEY_ENV};
use crate::domain::errors::*;
use crate::domain::model::{DEFAULT_TIMEOUT, MAX_RETRY_BUDGET};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "stockreel.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "STOCKREEL_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

/// Stock media provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry_budget: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: PexelsAdapter::DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            retry_budget: MAX_RETRY_BUDGET,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// External rendering tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub ffmpeg_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content).map_err(|e| {
            DomainError::Configuration(format!("Failed to parse TOML config: {}", e))
        })
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the config file (explicit path, `STOCKREEL_CONFIG`, or
    /// `stockreel.toml` if present), then environment overrides
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, DomainError> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::load_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment-style overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.provider.api_key = Some(key);
        }
        if let Some(url) = lookup("STOCKREEL_BASE_URL") {
            self.provider.base_url = url;
        }
        if let Some(timeout) = lookup("STOCKREEL_TIMEOUT_MS") {
            self.provider.timeout_ms = parse_value("STOCKREEL_TIMEOUT_MS", &timeout)?;
        }
        if let Some(retries) = lookup("STOCKREEL_RETRY_BUDGET") {
            self.provider.retry_budget = parse_value("STOCKREEL_RETRY_BUDGET", &retries)?;
        }
        if let Some(path) = lookup("STOCKREEL_FFMPEG") {
            self.render.ffmpeg_path = path;
        }
        if let Some(level) = lookup("STOCKREEL_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(json) = lookup("STOCKREEL_LOG_JSON") {
            self.log.json = parse_value("STOCKREEL_LOG_JSON", &json)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.provider.timeout_ms == 0 {
            return Err(DomainError::Configuration(
                "provider.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.provider.retry_budget > MAX_RETRY_BUDGET {
            return Err(DomainError::Configuration(format!(
                "provider.retry_budget cannot exceed {}",
                MAX_RETRY_BUDGET
            )));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(DomainError::Configuration(
                "provider.base_url cannot be empty".to_string(),
            ));
        }
        tracing::Level::from_str(&self.log.level).map_err(|_| {
            DomainError::Configuration(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                self.log.level
            ))
        })?;
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::Configuration(format!("Invalid value for {}: {}", key, value)))
}
