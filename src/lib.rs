//! Photo Feed Library
//!
//! A Rust library for querying public photo feeds such as the Flickr public
//! photos feed. Fetches a feed over HTTP, decodes it into photo records and
//! reports the result through a callback, either from a background worker or
//! inline on the calling task.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
