//! Data models for Photo Feed
//!
//! Photo records decoded from the feed, the status vocabulary shared by the
//! fetcher and the query pipeline, and the result pairs each of them
//! delivers through its callback.

use std::fmt;

use crate::constants::feed;

/// Progress of a single fetch or query
///
/// A status only ever moves forward:
/// `Idle -> InProgress -> {Ok | NotInitialized | FailedOrEmpty}`, with
/// `Ok -> FailedOrEmpty` allowed when decoding a fetched body fails.
/// `Idle -> NotInitialized` is also valid since a fetch without a target
/// never starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DownloadStatus {
    /// Nothing has happened yet
    #[default]
    Idle,
    /// Fetch has started
    InProgress,
    /// No target was supplied
    NotInitialized,
    /// Transport, permission or decode failure
    FailedOrEmpty,
    /// Body read (and decoded) successfully
    Ok,
}

impl DownloadStatus {
    /// Whether moving from `self` to `next` respects the forward-only order
    pub fn can_transition_to(self, next: DownloadStatus) -> bool {
        use DownloadStatus::*;
        matches!(
            (self, next),
            (Idle, InProgress)
                | (Idle, NotInitialized)
                | (InProgress, Ok)
                | (InProgress, FailedOrEmpty)
                | (Ok, FailedOrEmpty)
        )
    }

    /// Short name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Idle => "IDLE",
            DownloadStatus::InProgress => "IN_PROGRESS",
            DownloadStatus::NotInitialized => "NOT_INITIALIZED",
            DownloadStatus::FailedOrEmpty => "FAILED_OR_EMPTY",
            DownloadStatus::Ok => "OK",
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single photo from the public feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    title: String,
    author: String,
    author_id: String,
    link: String,
    tags: String,
    image: String,
}

impl PhotoRecord {
    /// Creates a record from already-decoded feed fields
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        author_id: impl Into<String>,
        link: impl Into<String>,
        tags: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            author_id: author_id.into(),
            link: link.into(),
            tags: tags.into(),
            image: image.into(),
        }
    }

    /// Creates a record from a thumbnail URL, deriving the full-size link
    pub fn from_thumbnail(
        title: impl Into<String>,
        author: impl Into<String>,
        author_id: impl Into<String>,
        tags: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        let image = thumbnail_url.into();
        let link = full_size_link(&image);
        Self::new(title, author, author_id, link, tags, image)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    /// Link to the full-size image
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// Thumbnail image URL
    pub fn image(&self) -> &str {
        &self.image
    }
}

impl fmt::Display for PhotoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Photo{{title='{}', author='{}', author_id='{}', link='{}', tags='{}', image='{}'}}",
            self.title, self.author, self.author_id, self.link, self.tags, self.image
        )
    }
}

/// Swap the first medium-size suffix in a feed image URL for the large one
///
/// URLs without the suffix are returned unchanged.
pub fn full_size_link(thumbnail_url: &str) -> String {
    thumbnail_url.replacen(feed::THUMBNAIL_SUFFIX, feed::FULL_SIZE_SUFFIX, 1)
}

/// Outcome of one fetch: the body (when read successfully) and final status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub body: Option<String>,
    pub status: DownloadStatus,
}

impl FetchResult {
    pub fn ok(body: String) -> Self {
        Self {
            body: Some(body),
            status: DownloadStatus::Ok,
        }
    }

    /// A result with no body
    pub fn empty(status: DownloadStatus) -> Self {
        Self { body: None, status }
    }
}

/// Outcome of one feed query: decoded photos and final status
///
/// `photos` is empty whenever `status` is not [`DownloadStatus::Ok`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResult {
    pub photos: Vec<PhotoRecord>,
    pub status: DownloadStatus,
}

impl FeedResult {
    pub fn ok(photos: Vec<PhotoRecord>) -> Self {
        Self {
            photos,
            status: DownloadStatus::Ok,
        }
    }

    /// A failed result carrying no photos
    pub fn failed(status: DownloadStatus) -> Self {
        Self {
            photos: Vec::new(),
            status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == DownloadStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_forward_transitions() {
        use DownloadStatus::*;

        assert!(Idle.can_transition_to(InProgress));
        assert!(Idle.can_transition_to(NotInitialized));
        assert!(InProgress.can_transition_to(Ok));
        assert!(InProgress.can_transition_to(FailedOrEmpty));
        assert!(Ok.can_transition_to(FailedOrEmpty));

        // Never backward
        assert!(!InProgress.can_transition_to(Idle));
        assert!(!Ok.can_transition_to(InProgress));
        assert!(!FailedOrEmpty.can_transition_to(Ok));
        assert!(!NotInitialized.can_transition_to(InProgress));
        assert!(!Idle.can_transition_to(Ok));
    }

    #[test]
    fn test_status_default_and_display() {
        assert_eq!(DownloadStatus::default(), DownloadStatus::Idle);
        assert_eq!(DownloadStatus::FailedOrEmpty.to_string(), "FAILED_OR_EMPTY");
    }

    #[test]
    fn test_full_size_link_replaces_first_suffix_only() {
        assert_eq!(full_size_link("http://x/123_m.jpg"), "http://x/123_b.jpg");
        assert_eq!(
            full_size_link("http://x/a_m.dir/123_m.jpg"),
            "http://x/a_b.dir/123_m.jpg"
        );
        assert_eq!(full_size_link("http://x/123.jpg"), "http://x/123.jpg");
        // Literal match: "_mx" is not the suffix
        assert_eq!(full_size_link("http://x/123_mxjpg"), "http://x/123_mxjpg");
    }

    #[test]
    fn test_photo_record_from_thumbnail() {
        let photo = PhotoRecord::from_thumbnail(
            "Sunset",
            "nobody@flickr.com (\"someone\")",
            "12345@N00",
            "android nougat",
            "https://live.staticflickr.com/65535/1_abc_m.jpg",
        );

        assert_eq!(photo.title(), "Sunset");
        assert_eq!(photo.author_id(), "12345@N00");
        assert_eq!(photo.image(), "https://live.staticflickr.com/65535/1_abc_m.jpg");
        assert_eq!(photo.link(), "https://live.staticflickr.com/65535/1_abc_b.jpg");

        let rendered = photo.to_string();
        assert!(rendered.starts_with("Photo{title='Sunset'"));
        assert!(rendered.contains("tags='android nougat'"));
    }

    #[test]
    fn test_feed_result_constructors() {
        let failed = FeedResult::failed(DownloadStatus::NotInitialized);
        assert!(failed.photos.is_empty());
        assert!(!failed.is_ok());

        let fetched = FetchResult::empty(DownloadStatus::FailedOrEmpty);
        assert!(fetched.body.is_none());
        assert_eq!(FetchResult::ok("x\n".into()).status, DownloadStatus::Ok);
    }
}
