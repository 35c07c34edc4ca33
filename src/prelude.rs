//! Prelude module for Photo Feed Library
//!
//! Re-exports the items needed for typical usage with a single
//! `use photo_feed::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use photo_feed::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http = HttpHandler::from_config(&ClientConfig::default())?;
//!     let query = FeedQuery::new(http, FeedConfig::default())?;
//!
//!     query
//!         .run(DEFAULT_SEARCH_TERMS, Dispatch::Background, |result| {
//!             println!("{} photos, status {}", result.photos.len(), result.status);
//!         })
//!         .await;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

pub use crate::app::{
    ClientConfig, Dispatch, DownloadStatus, FeedConfig, FeedQuery, FeedResult, FetchResult,
    HttpHandler, PendingDownload, PendingFeed, PhotoRecord, RawDataFetcher,
};

pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_SEARCH_TERMS};

pub use tokio;
