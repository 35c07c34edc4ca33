//! Feed query pipeline
//!
//! Builds the public feed URL for a search, hands the transfer to a
//! [`RawDataFetcher`] and decodes the returned JSON into [`PhotoRecord`]s.
//! The caller's callback receives a [`FeedResult`] exactly once per query.
//!
//! # Examples
//!
//! ```rust,no_run
//! use photo_feed::app::{ClientConfig, Dispatch, FeedConfig, FeedQuery, HttpHandler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpHandler::from_config(&ClientConfig::default())?;
//! let query = FeedQuery::new(http, FeedConfig::default())?;
//!
//! query
//!     .run("android, nougat", Dispatch::Background, |result| {
//!         for photo in &result.photos {
//!             println!("{}", photo);
//!         }
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::app::client::HttpHandler;
use crate::app::fetcher::{PendingDownload, RawDataFetcher};
use crate::app::models::{DownloadStatus, FeedResult, FetchResult, PhotoRecord};
use crate::constants::feed;
use crate::errors::{ConfigError, ConfigResult, DecodeError, DecodeResult};

/// Where the work of a query runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Transfer on a worker task, callback on the awaiting task
    Background,
    /// Everything on the calling task, callback before `run` returns
    SameThread,
}

/// Feed endpoint and query options, fixed for the lifetime of a [`FeedQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed endpoint without query parameters
    pub base_url: String,
    /// Language code sent as `lang`
    pub language: String,
    /// Require every tag to match (`ALL`) rather than any (`ANY`)
    pub match_all: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: feed::DEFAULT_BASE_URL.to_string(),
            language: feed::DEFAULT_LANGUAGE.to_string(),
            match_all: true,
        }
    }
}

/// Queries the public photo feed
#[derive(Debug, Clone)]
pub struct FeedQuery {
    http: HttpHandler,
    base_url: Url,
    language: String,
    match_all: bool,
}

impl FeedQuery {
    /// Creates a query pipeline
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `config.base_url` is not an
    /// absolute URL
    pub fn new(http: HttpHandler, config: FeedConfig) -> ConfigResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "feed.base_url".to_string(),
            value: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url,
            language: config.language,
            match_all: config.match_all,
        })
    }

    /// Builds the feed URL for a search
    ///
    /// Parameters are appended after any already present on the base URL.
    pub fn build_url(&self, search_terms: &str) -> Url {
        let tag_mode = if self.match_all {
            feed::TAG_MODE_ALL
        } else {
            feed::TAG_MODE_ANY
        };

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(feed::PARAM_TAGS, search_terms)
            .append_pair(feed::PARAM_TAG_MODE, tag_mode)
            .append_pair(feed::PARAM_LANG, &self.language)
            .append_pair(feed::PARAM_FORMAT, feed::FORMAT_JSON)
            .append_pair(feed::PARAM_NO_JSON_CALLBACK, "1");

        debug!("build_url: {}", url);
        url
    }

    /// Runs a query, invoking `on_data_available` exactly once
    ///
    /// The fetch uses the same dispatch mode as the query. With
    /// [`Dispatch::SameThread`] the callback has run by the time this
    /// returns; with [`Dispatch::Background`] the transfer runs on a worker
    /// and the callback runs here once the worker hands its result back.
    pub async fn run<F>(&self, search_terms: &str, dispatch: Dispatch, on_data_available: F)
    where
        F: FnOnce(FeedResult),
    {
        debug!("run: starts ({:?})", dispatch);
        match dispatch {
            Dispatch::Background => {
                self.execute(search_terms)
                    .on_data_available(on_data_available)
                    .await
            }
            Dispatch::SameThread => {
                let url = self.build_url(search_terms);
                RawDataFetcher::new(self.http.clone())
                    .run_in_same_thread(Some(url.as_str()), |fetched| {
                        on_data_available(on_download_complete(fetched))
                    })
                    .await;
            }
        }
        debug!("run: ends");
    }

    /// Starts a background query and returns without waiting for it
    pub fn execute(&self, search_terms: &str) -> PendingFeed {
        let url = self.build_url(search_terms);
        let download = RawDataFetcher::new(self.http.clone()).execute(Some(url.into()));
        PendingFeed { download }
    }

    /// Runs a query entirely on the calling task
    pub async fn execute_on_same_thread<F>(&self, search_terms: &str, on_data_available: F)
    where
        F: FnOnce(FeedResult),
    {
        self.run(search_terms, Dispatch::SameThread, on_data_available)
            .await
    }
}

/// A feed query whose transfer is running on a worker task
#[derive(Debug)]
pub struct PendingFeed {
    download: PendingDownload,
}

impl PendingFeed {
    /// Waits for the transfer, decodes it here and invokes the callback
    pub async fn on_data_available<F>(self, on_data_available: F)
    where
        F: FnOnce(FeedResult),
    {
        self.download
            .on_download_complete(|fetched| on_data_available(on_download_complete(fetched)))
            .await
    }
}

/// Turns a fetch outcome into a feed outcome
///
/// Only an `Ok` fetch is decoded. A decode failure downgrades the status to
/// `FailedOrEmpty` and discards any records decoded before the failure.
pub fn on_download_complete(fetched: FetchResult) -> FeedResult {
    debug!("on_download_complete: starts, status = {}", fetched.status);

    let body = match (fetched.status, fetched.body) {
        (DownloadStatus::Ok, Some(body)) => body,
        (DownloadStatus::Ok, None) => {
            error!("on_download_complete: OK status without a body");
            return FeedResult::failed(DownloadStatus::FailedOrEmpty);
        }
        (status, _) => return FeedResult::failed(status),
    };

    match decode_feed(&body) {
        Ok(photos) => {
            debug!("on_download_complete: decoded {} photos", photos.len());
            FeedResult::ok(photos)
        }
        Err(e) => {
            error!("on_download_complete: Error processing JSON data: {}", e);
            FeedResult::failed(DownloadStatus::FailedOrEmpty)
        }
    }
}

#[derive(Deserialize)]
struct FeedEnvelope {
    items: Vec<Value>,
}

#[derive(Deserialize)]
struct FeedItem {
    title: String,
    author: String,
    author_id: String,
    tags: String,
    media: Value,
}

#[derive(Deserialize)]
struct FeedMedia {
    m: String,
}

/// Deserializes `value` by field name, refusing anything but a JSON object
///
/// Derived struct deserializers also accept arrays by position, which a feed
/// never sends.
fn from_object<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    if value.is_object() {
        return serde_json::from_value(value);
    }

    let unexpected = match &value {
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Null | Value::Object(_) => Unexpected::Unit,
    };
    Err(serde_json::Error::invalid_type(unexpected, &"a JSON object"))
}

fn decode_item(value: Value) -> Result<PhotoRecord, serde_json::Error> {
    let item: FeedItem = from_object(value)?;
    let media: FeedMedia = from_object(item.media)?;
    Ok(PhotoRecord::from_thumbnail(
        item.title,
        item.author,
        item.author_id,
        item.tags,
        media.m,
    ))
}

/// Decodes a feed body into photo records, in `items` order
///
/// The body, every item and every item's `media` must be JSON objects.
///
/// # Errors
///
/// Returns `DecodeError::JsonParse` if the body is not a JSON object with an
/// `items` array, and `DecodeError::Item` for the first item that is not an
/// object or lacks a required string field
pub fn decode_feed(body: &str) -> DecodeResult<Vec<PhotoRecord>> {
    let envelope: FeedEnvelope = from_object(serde_json::from_str(body)?)?;
    let mut photos = Vec::with_capacity(envelope.items.len());

    for (index, item) in envelope.items.into_iter().enumerate() {
        let photo = decode_item(item).map_err(|source| DecodeError::Item { index, source })?;
        debug!("decode_feed: {}", photo);
        photos.push(photo);
    }

    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::ClientConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TWO_ITEMS: &str = r#"{
        "title": "Recent Uploads tagged android and nougat",
        "items": [
            {
                "title": "Pixel on the desk",
                "link": "https://www.flickr.com/photos/someone/1/",
                "media": {"m": "https://live.staticflickr.com/65535/1_aaa_m.jpg"},
                "author": "nobody@flickr.com (\"someone\")",
                "author_id": "111@N01",
                "tags": "android nougat pixel"
            },
            {
                "title": "Lock screen",
                "media": {"m": "https://live.staticflickr.com/65535/2_bbb_m.jpg"},
                "author": "nobody@flickr.com (\"other\")",
                "author_id": "222@N02",
                "tags": "android nougat"
            }
        ]
    }"#;

    fn query_for(base_url: &str, match_all: bool) -> FeedQuery {
        let http = HttpHandler::from_config(&ClientConfig::default()).unwrap();
        FeedQuery::new(
            http,
            FeedConfig {
                base_url: base_url.to_string(),
                language: "en-us".to_string(),
                match_all,
            },
        )
        .unwrap()
    }

    async fn feed_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/feeds/photos_public.gne"))
            .and(query_param("tags", "android, nougat"))
            .and(query_param("format", "json"))
            .and(query_param("nojsoncallback", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn endpoint(server: &MockServer) -> String {
        format!("{}/services/feeds/photos_public.gne", server.uri())
    }

    #[test]
    fn test_build_url_parameters_in_order() {
        let query = query_for("http://api.flickr.com/services/feeds/photos_public.gne", true);
        let url = query.build_url("android, nougat");

        assert_eq!(
            url.as_str(),
            "http://api.flickr.com/services/feeds/photos_public.gne?tags=android%2C+nougat&tagmode=ALL&lang=en-us&format=json&nojsoncallback=1"
        );
    }

    #[test]
    fn test_build_url_any_mode() {
        let query = query_for("http://example.com/feed", false);
        let url = query.build_url("cats");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("tagmode".to_string(), "ANY".to_string())));
        assert!(pairs.contains(&("tags".to_string(), "cats".to_string())));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let http = HttpHandler::from_config(&ClientConfig::default()).unwrap();
        let config = FeedConfig {
            base_url: "photos_public.gne".to_string(),
            ..Default::default()
        };

        match FeedQuery::new(http, config) {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "feed.base_url"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_feed_maps_fields() {
        let photos = decode_feed(TWO_ITEMS).unwrap();

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].title(), "Pixel on the desk");
        assert_eq!(photos[0].author(), "nobody@flickr.com (\"someone\")");
        assert_eq!(photos[0].author_id(), "111@N01");
        assert_eq!(photos[0].tags(), "android nougat pixel");
        assert_eq!(
            photos[0].image(),
            "https://live.staticflickr.com/65535/1_aaa_m.jpg"
        );
        assert_eq!(
            photos[0].link(),
            "https://live.staticflickr.com/65535/1_aaa_b.jpg"
        );
        assert_eq!(photos[1].title(), "Lock screen");
    }

    #[test]
    fn test_decode_feed_empty_items() {
        assert!(decode_feed(r#"{"items": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_feed_missing_media() {
        let body = r#"{"items": [
            {"title": "a", "author": "b", "author_id": "c", "tags": "d", "media": {"m": "x_m.jpg"}},
            {"title": "a", "author": "b", "author_id": "c", "tags": "d"}
        ]}"#;

        match decode_feed(body) {
            Err(DecodeError::Item { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected Item error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_feed_malformed_json() {
        assert!(matches!(
            decode_feed("{\"items\": [").unwrap_err(),
            DecodeError::JsonParse(_)
        ));
        assert!(matches!(
            decode_feed("{\"title\": \"no items\"}").unwrap_err(),
            DecodeError::JsonParse(_)
        ));
    }

    #[test]
    fn test_decode_feed_requires_objects() {
        assert!(matches!(
            decode_feed("[[]]").unwrap_err(),
            DecodeError::JsonParse(_)
        ));

        let array_item = r#"{"items": [["t", "a", "id", "tags", {"m": "x_m.jpg"}]]}"#;
        match decode_feed(array_item) {
            Err(DecodeError::Item { index, .. }) => assert_eq!(index, 0),
            other => panic!("Expected Item error, got {:?}", other),
        }

        let array_media = r#"{"items": [
            {"title": "t", "author": "a", "author_id": "id", "tags": "tags", "media": ["x_m.jpg"]}
        ]}"#;
        match decode_feed(array_media) {
            Err(DecodeError::Item { index, .. }) => assert_eq!(index, 0),
            other => panic!("Expected Item error, got {:?}", other),
        }
    }

    #[test]
    fn test_on_download_complete_rejects_array_shapes() {
        let bodies = [
            "[[]]",
            r#"{"items": [["t", "a", "id", "tags", {"m": "x_m.jpg"}]]}"#,
            r#"{"items": [{"title": "t", "author": "a", "author_id": "id", "tags": "tags", "media": ["x_m.jpg"]}]}"#,
        ];

        for body in bodies {
            let result = on_download_complete(FetchResult::ok(body.to_string()));
            assert_eq!(
                result,
                FeedResult::failed(DownloadStatus::FailedOrEmpty),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_on_download_complete_mirrors_fetch_failure() {
        let result = on_download_complete(FetchResult::empty(DownloadStatus::NotInitialized));
        assert_eq!(result, FeedResult::failed(DownloadStatus::NotInitialized));

        let result = on_download_complete(FetchResult::empty(DownloadStatus::FailedOrEmpty));
        assert_eq!(result, FeedResult::failed(DownloadStatus::FailedOrEmpty));
    }

    #[test]
    fn test_on_download_complete_discards_partial_decode() {
        let body = r#"{"items": [
            {"title": "a", "author": "b", "author_id": "c", "tags": "d", "media": {"m": "x_m.jpg"}},
            {"title": "a", "author": "b", "author_id": "c", "tags": "d", "media": {}}
        ]}"#;

        let result = on_download_complete(FetchResult::ok(body.to_string()));
        assert_eq!(result.status, DownloadStatus::FailedOrEmpty);
        assert!(result.photos.is_empty());
    }

    #[tokio::test]
    async fn test_same_thread_callback_fires_before_return() {
        let server = feed_server(TWO_ITEMS).await;
        let query = query_for(&endpoint(&server), true);

        let mut delivered = None;
        query
            .execute_on_same_thread("android, nougat", |result| delivered = Some(result))
            .await;

        let result = delivered.expect("callback must have fired");
        assert_eq!(result.status, DownloadStatus::Ok);
        assert_eq!(result.photos.len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_modes_agree() {
        let server = feed_server(TWO_ITEMS).await;
        let query = query_for(&endpoint(&server), true);

        let mut same_thread = None;
        query
            .run("android, nougat", Dispatch::SameThread, |r| same_thread = Some(r))
            .await;

        let mut background = None;
        query
            .run("android, nougat", Dispatch::Background, |r| background = Some(r))
            .await;

        assert!(same_thread.is_some());
        assert_eq!(same_thread, background);
    }

    #[tokio::test]
    async fn test_pending_feed_collected_later() {
        let server = feed_server(TWO_ITEMS).await;
        let query = query_for(&endpoint(&server), true);

        let pending = query.execute("android, nougat");
        let mut delivered = None;
        pending.on_data_available(|r| delivered = Some(r)).await;

        assert_eq!(delivered.map(|r| r.photos.len()), Some(2));
    }

    #[tokio::test]
    async fn test_transport_failure_reports_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let query = query_for(&endpoint(&server), true);

        for dispatch in [Dispatch::SameThread, Dispatch::Background] {
            let mut delivered = None;
            query
                .run("android, nougat", dispatch, |r| delivered = Some(r))
                .await;
            assert_eq!(
                delivered,
                Some(FeedResult::failed(DownloadStatus::FailedOrEmpty))
            );
        }
    }
}
