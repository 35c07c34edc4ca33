//! Error types for Photo Feed
//!
//! Transfer and decode failures are typed here so each origin can be logged
//! precisely. They never cross the fetcher or pipeline callbacks: those only
//! carry a [`DownloadStatus`](crate::app::models::DownloadStatus).

use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while transferring a feed body
#[derive(Error, Debug)]
pub enum TransferError {
    /// Target could not be parsed as an absolute URL
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Target uses a scheme the fetcher is not permitted to open
    #[error("Access to scheme '{scheme}' is not permitted")]
    Forbidden { scheme: String },

    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// I/O error while reading the response body
    #[error("I/O error reading data")]
    Io(#[from] std::io::Error),

    /// Server returned a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },
}

impl TransferError {
    /// Short label for the failure origin, used in log lines
    pub fn origin(&self) -> &'static str {
        match self {
            TransferError::InvalidUrl { .. } => "invalid url",
            TransferError::Forbidden { .. } => "security",
            TransferError::Http(_) | TransferError::Io(_) | TransferError::ServerError { .. } => {
                "io"
            }
        }
    }
}

/// Failures while decoding a feed body into photo records
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body is not valid JSON or does not have the expected shape
    #[error("JSON parsing error in feed")]
    JsonParse(#[from] serde_json::Error),

    /// Item at the given position is malformed
    #[error("Malformed feed item at index {index}")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// reqwest refused the client configuration
    #[error("Failed to build HTTP client")]
    Build(#[from] reqwest::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Transfer error
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Decode error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// HTTP client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Transfer(_) => "transfer",
            AppError::Decode(_) => "decode",
            AppError::Client(_) => "client",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Transfer result type alias
pub type TransferResult<T> = std::result::Result<T, TransferError>;

/// Decode result type alias
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_origins() {
        let invalid = TransferError::InvalidUrl {
            url: "nope".to_string(),
            error: "relative URL without a base".to_string(),
        };
        assert_eq!(invalid.origin(), "invalid url");
        assert!(invalid.to_string().contains("nope"));

        let forbidden = TransferError::Forbidden {
            scheme: "file".to_string(),
        };
        assert_eq!(forbidden.origin(), "security");

        let status = TransferError::ServerError { status: 404 };
        assert_eq!(status.origin(), "io");
        assert_eq!(status.to_string(), "Server error: HTTP 404");
    }

    #[test]
    fn test_app_error_categories() {
        let err = AppError::from(ConfigError::NoConfigDir);
        assert_eq!(err.category(), "config");

        let err = AppError::generic("boom");
        assert_eq!(err.category(), "generic");
        assert_eq!(err.to_string(), "Application error: boom");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(DecodeError::from(json_err));
        assert_eq!(err.category(), "decode");
    }
}
