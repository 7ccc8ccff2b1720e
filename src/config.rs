//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub journal: JournalSettings,

    #[serde(default)]
    pub estimator: EstimatorSettings,

    #[serde(default)]
    pub directory: DirectorySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keyed store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("nutrilog").to_string_lossy().to_string())
        .unwrap_or_else(|| "./nutrilog_data".to_string())
}

fn default_max_document_bytes() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Journal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JournalSettings {
    /// Offset from UTC, in minutes, defining the local calendar day used
    /// for daily views and water day-buckets
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
        }
    }
}

impl JournalSettings {
    /// The configured offset as a `FixedOffset`. Out-of-range values fall
    /// back to UTC with a warning.
    pub fn offset(&self) -> chrono::FixedOffset {
        use chrono::Offset;

        match chrono::FixedOffset::east_opt(self.utc_offset_minutes * 60) {
            Some(offset) => offset,
            None => {
                tracing::warn!(
                    minutes = self.utc_offset_minutes,
                    "Invalid UTC offset, falling back to UTC"
                );
                chrono::Utc.fix()
            }
        }
    }
}

/// Estimation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorSettings {
    #[serde(default = "default_estimator_url")]
    pub url: String,

    #[serde(default = "default_estimator_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_estimator_enabled")]
    pub enabled: bool,
}

fn default_estimator_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_estimator_timeout() -> u64 {
    15_000
}

fn default_estimator_enabled() -> bool {
    true
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            url: default_estimator_url(),
            request_timeout_ms: default_estimator_timeout(),
            enabled: default_estimator_enabled(),
        }
    }
}

/// Profile directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_directory_url")]
    pub url: String,

    #[serde(default = "default_directory_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub enabled: bool,
}

fn default_directory_url() -> String {
    "http://localhost:8091".to_string()
}

fn default_directory_timeout() -> u64 {
    5_000
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            url: default_directory_url(),
            request_timeout_ms: default_directory_timeout(),
            enabled: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("nutrilog").join("config.toml")),
            Some(PathBuf::from("/etc/nutrilog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("NUTRILOG_DATA_DIR") {
            self.store.data_dir = data_dir;
        }

        if let Ok(host) = std::env::var("NUTRILOG_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("NUTRILOG_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(offset) = std::env::var("NUTRILOG_UTC_OFFSET_MINUTES") {
            if let Ok(minutes) = offset.parse() {
                self.journal.utc_offset_minutes = minutes;
            }
        }

        if let Ok(url) = std::env::var("NUTRILOG_ESTIMATOR_URL") {
            self.estimator.url = url;
        }
        if let Ok(enabled) = std::env::var("NUTRILOG_ESTIMATOR_ENABLED") {
            self.estimator.enabled = enabled.to_lowercase() != "false" && enabled != "0";
        }

        if let Ok(url) = std::env::var("NUTRILOG_DIRECTORY_URL") {
            self.directory.url = url;
            self.directory.enabled = true;
        }

        if let Ok(level) = std::env::var("NUTRILOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NUTRILOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreSettings::default(),
            api: ApiSettings::default(),
            journal: JournalSettings::default(),
            estimator: EstimatorSettings::default(),
            directory: DirectorySettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Nutrilog Configuration
#
# Environment variables override these settings:
# - NUTRILOG_DATA_DIR
# - NUTRILOG_API_HOST
# - NUTRILOG_API_PORT
# - NUTRILOG_UTC_OFFSET_MINUTES
# - NUTRILOG_ESTIMATOR_URL
# - NUTRILOG_ESTIMATOR_ENABLED
# - NUTRILOG_DIRECTORY_URL
# - NUTRILOG_LOG_LEVEL
# - NUTRILOG_LOG_FORMAT

[store]
# Directory for the keyed document files
data_dir = "~/.local/share/nutrilog"

# Quota per serialized document (bytes)
max_document_bytes = 5242880

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Request timeout in seconds
request_timeout_secs = 30

[journal]
# Offset from UTC (minutes) defining the local calendar day
utc_offset_minutes = 0

[estimator]
# Calorie estimation service URL
url = "http://localhost:8090"

# Request timeout (ms)
request_timeout_ms = 15000

# Enable the estimation endpoint
enabled = true

[directory]
# Remote profile directory URL
url = "http://localhost:8091"

# Request timeout (ms)
request_timeout_ms = 5000

# Enable sign-in recording
enabled = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/nutrilog/nutrilog.log"
"#
    .to_string()
}
