//! HTTP client for public photo feeds
//!
//! - `config`: HTTP client configuration and building
//! - `http`: target validation, GET requests and line-oriented body reads

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpHandler;

use crate::errors::ClientError;

impl HttpHandler {
    /// Builds a handler from client configuration
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the underlying HTTP client cannot be built
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = config.build_http_client()?;
        tracing::debug!("Created feed HTTP client (timeout {:?})", config.request_timeout);
        Ok(Self::new(client))
    }
}
