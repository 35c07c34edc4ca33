//! Application constants for Photo Feed
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Photo-Feed/0.1.0 (Public Feed Browser)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// URL schemes the fetcher is permitted to open
    pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
}

/// Public photo feed endpoint and query vocabulary
pub mod feed {
    /// Flickr public photos feed
    pub const DEFAULT_BASE_URL: &str = "http://api.flickr.com/services/feeds/photos_public.gne";

    /// Default feed language
    pub const DEFAULT_LANGUAGE: &str = "en-us";

    /// Search terms used when the caller gives none
    pub const DEFAULT_SEARCH_TERMS: &str = "android, nougat";

    /// Query parameter names, in the order they are appended
    pub const PARAM_TAGS: &str = "tags";
    pub const PARAM_TAG_MODE: &str = "tagmode";
    pub const PARAM_LANG: &str = "lang";
    pub const PARAM_FORMAT: &str = "format";
    pub const PARAM_NO_JSON_CALLBACK: &str = "nojsoncallback";

    pub const TAG_MODE_ALL: &str = "ALL";
    pub const TAG_MODE_ANY: &str = "ANY";
    pub const FORMAT_JSON: &str = "json";

    /// Size suffix of the thumbnail ("medium") rendition
    pub const THUMBNAIL_SUFFIX: &str = "_m.";

    /// Size suffix of the full-size ("large") rendition
    pub const FULL_SIZE_SUFFIX: &str = "_b.";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "photo-feed.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "photo-feed";

    /// File name inside the user config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

/// Logging and debugging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Crate target used for the log filter directive
    pub const LOG_TARGET: &str = "photo_feed";
}

// Re-export commonly used constants for convenience
pub use feed::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_SEARCH_TERMS};
pub use http::USER_AGENT;
