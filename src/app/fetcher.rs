//! Raw data fetcher
//!
//! Performs one GET against a target URL, reads the body line by line and
//! reports `(body, status)` exactly once through a callback. Failures never
//! escape as errors: they are logged where they happen and reported as
//! [`DownloadStatus::FailedOrEmpty`].
//!
//! Two dispatch modes share the same transfer logic:
//!
//! - [`RawDataFetcher::execute`] spawns the transfer on a worker task and
//!   returns a [`PendingDownload`]; the callback runs on whichever task awaits
//!   [`PendingDownload::on_download_complete`].
//! - [`RawDataFetcher::run_in_same_thread`] performs the transfer on the
//!   calling task and runs the callback before returning.

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::app::client::HttpHandler;
use crate::app::models::{DownloadStatus, FetchResult};
use crate::errors::{TransferError, TransferResult};

/// Fetches the raw body of a single URL
///
/// Each fetcher owns its status for the lifetime of one fetch and is
/// consumed by it.
#[derive(Debug, Clone)]
pub struct RawDataFetcher {
    http: HttpHandler,
    status: DownloadStatus,
}

impl RawDataFetcher {
    /// Creates an idle fetcher
    pub fn new(http: HttpHandler) -> Self {
        Self {
            http,
            status: DownloadStatus::Idle,
        }
    }

    /// Starts the fetch on a worker task
    ///
    /// The transfer begins immediately; the caller decides when to collect
    /// the result via [`PendingDownload::on_download_complete`].
    pub fn execute(mut self, target: Option<String>) -> PendingDownload {
        debug!("execute: starts");
        let task = tokio::spawn(async move { self.download(target.as_deref()).await });
        PendingDownload { task }
    }

    /// Performs the fetch on the calling task and invokes the callback inline
    ///
    /// Returns the fetcher's final status once the callback has run.
    pub async fn run_in_same_thread<F>(
        mut self,
        target: Option<&str>,
        on_download_complete: F,
    ) -> DownloadStatus
    where
        F: FnOnce(FetchResult),
    {
        debug!("run_in_same_thread: starts");
        let result = self.download(target).await;
        on_download_complete(result);
        debug!("run_in_same_thread: ends with status {}", self.status);
        self.status
    }

    /// Shared transfer logic for both dispatch modes
    async fn download(&mut self, target: Option<&str>) -> FetchResult {
        let Some(target) = target else {
            self.set_status(DownloadStatus::NotInitialized);
            return FetchResult::empty(self.status);
        };

        self.set_status(DownloadStatus::InProgress);

        match self.transfer(target).await {
            Ok(body) => {
                self.set_status(DownloadStatus::Ok);
                FetchResult::ok(body)
            }
            Err(e) => {
                log_transfer_failure(target, &e);
                self.set_status(DownloadStatus::FailedOrEmpty);
                FetchResult::empty(self.status)
            }
        }
    }

    /// Response and reader live only inside this call
    async fn transfer(&self, target: &str) -> TransferResult<String> {
        let url = HttpHandler::parse_target(target)?;
        self.http.get_text(&url).await
    }

    fn set_status(&mut self, next: DownloadStatus) {
        if self.status.can_transition_to(next) {
            self.status = next;
        } else {
            warn!("Refusing status transition from {} to {}", self.status, next);
        }
    }
}

fn log_transfer_failure(target: &str, e: &TransferError) {
    match e {
        TransferError::InvalidUrl { error, .. } => {
            error!("download: Invalid URL {}: {}", target, error)
        }
        TransferError::Forbidden { scheme } => {
            error!(
                "download: Security failure, access to {} ({}) is not permitted",
                target, scheme
            )
        }
        TransferError::Http(err) => {
            error!("download: Unable to open a connection to {}: {}", target, err)
        }
        TransferError::Io(err) => {
            error!("download: IO failure reading data from {}: {}", target, err)
        }
        TransferError::ServerError { status } => {
            error!("download: {} responded with HTTP {}", target, status)
        }
    }
    debug!("Transfer failure origin: {}", e.origin());
}

/// A fetch running on a worker task
#[derive(Debug)]
pub struct PendingDownload {
    task: JoinHandle<FetchResult>,
}

impl PendingDownload {
    /// Waits for the worker and invokes the callback on the awaiting task
    ///
    /// A worker that panicked or was cancelled is reported as
    /// `(None, FailedOrEmpty)`.
    pub async fn on_download_complete<F>(self, on_download_complete: F)
    where
        F: FnOnce(FetchResult),
    {
        let result = match self.task.await {
            Ok(result) => result,
            Err(e) => {
                error!("Download worker did not complete: {}", e);
                FetchResult::empty(DownloadStatus::FailedOrEmpty)
            }
        };
        debug!("on_download_complete: status = {}", result.status);
        on_download_complete(result);
    }
}
