//! Core HTTP operations for feed transfers
//!
//! Target validation, a single GET per call, and line-oriented reading of
//! the response body. No retries: every request is a single attempt.

use std::io;

use futures::TryStreamExt;
use reqwest::{Client, Method, Response};
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;
use url::Url;

use crate::constants::http::ALLOWED_SCHEMES;
use crate::errors::{TransferError, TransferResult};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler around an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Parses a fetch target and checks it may be opened
    ///
    /// # Errors
    ///
    /// Returns `TransferError::InvalidUrl` if `target` is not an absolute URL
    /// and `TransferError::Forbidden` if its scheme is not http(s)
    pub fn parse_target(target: &str) -> TransferResult<Url> {
        let url = Url::parse(target).map_err(|e| TransferError::InvalidUrl {
            url: target.to_string(),
            error: e.to_string(),
        })?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(TransferError::Forbidden {
                scheme: url.scheme().to_string(),
            });
        }

        Ok(url)
    }

    /// Issues a GET for `url` and returns the response once headers arrive
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Http` if the request cannot be sent and
    /// `TransferError::ServerError` for a non-success status
    pub async fn get_response(&self, url: &Url) -> TransferResult<Response> {
        let response = self
            .client
            .request(Method::GET, url.clone())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("The response code was {}", status.as_u16());

        if !status.is_success() {
            return Err(TransferError::ServerError {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Reads a response body line by line into a single buffer
    ///
    /// Each line is followed by `\n` in the result, including the last one,
    /// and `\r\n` terminators are normalized to `\n`. The response stream and
    /// reader are dropped before this returns.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Io` if the stream fails or is not valid UTF-8
    pub async fn read_lines(response: Response) -> TransferResult<String> {
        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let mut lines = StreamReader::new(Box::pin(stream)).lines();

        let mut body = String::new();
        while let Some(line) = lines.next_line().await? {
            body.push_str(&line);
            body.push('\n');
        }

        Ok(body)
    }

    /// Fetches `url` and returns its body as newline-terminated text
    pub async fn get_text(&self, url: &Url) -> TransferResult<String> {
        let response = self.get_response(url).await?;
        let body = Self::read_lines(response).await?;
        tracing::debug!("Successfully fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
