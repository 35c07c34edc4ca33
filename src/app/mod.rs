//! Core application logic for Photo Feed
//!
//! This module contains the HTTP client, the raw data fetcher, the feed query
//! pipeline and the data models they exchange.
//!
//! # Examples
//!
//! ```rust,no_run
//! use photo_feed::app::{ClientConfig, DownloadStatus, FeedConfig, FeedQuery, HttpHandler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpHandler::from_config(&ClientConfig::default())?;
//! let query = FeedQuery::new(http, FeedConfig::default())?;
//!
//! query
//!     .execute_on_same_thread("android, nougat", |result| {
//!         if result.status == DownloadStatus::Ok {
//!             println!("Found {} photos", result.photos.len());
//!         }
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod feed;
pub mod fetcher;
pub mod models;

// Re-export main public API
pub use client::{ClientConfig, HttpHandler};
pub use feed::{decode_feed, Dispatch, FeedConfig, FeedQuery, PendingFeed};
pub use fetcher::{PendingDownload, RawDataFetcher};
pub use models::{full_size_link, DownloadStatus, FeedResult, FetchResult, PhotoRecord};
