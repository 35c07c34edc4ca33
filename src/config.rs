//! Configuration management for Photo Feed
//!
//! Multi-source configuration: defaults, then a TOML file, then command-line
//! overrides applied by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, FeedConfig};
use crate::constants::{config as paths, feed, http, logging};
use crate::errors::{AppError, ConfigError, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feed endpoint and query options
    pub feed: FeedConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            tcp_nodelay: true,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first standard location found)
    ///
    /// CLI overrides are applied by the command handlers afterwards.
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path }.into());
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(paths::LOCAL_CONFIG_FILE)];
        if let Ok(user_config) = Self::default_config_path() {
            search_paths.push(user_config);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(paths::CONFIG_DIR_NAME)
            .join(paths::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::generic(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::from)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Write a commented default configuration file
    ///
    /// Existing files are left alone unless `force` is set. Returns whether a
    /// file was written.
    pub async fn write_default(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            debug!("Config file already exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::generic(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content()).await?;
        info!("Wrote default configuration to: {}", path.display());
        Ok(true)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::generic(format!("Failed to serialize config: {}", e)))
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Photo Feed Configuration
# You can customize any of these settings to suit your needs.

[feed]
# Public feed endpoint (query parameters are added per search)
base_url = "{}"

# Language code sent with every query
language = "{}"

# true = photos must carry every tag (ALL), false = any tag (ANY)
match_all = true

[client]
# HTTP client settings
request_timeout_secs = {}
connect_timeout_secs = {}
tcp_nodelay = true
pool_idle_timeout_secs = {}

[logging]
level = "{}"  # error, warn, info, debug, trace
"#,
            feed::DEFAULT_BASE_URL,
            feed::DEFAULT_LANGUAGE,
            http::DEFAULT_TIMEOUT.as_secs(),
            http::CONNECT_TIMEOUT.as_secs(),
            http::POOL_IDLE_TIMEOUT.as_secs(),
            logging::DEFAULT_LOG_LEVEL,
        )
    }
}
