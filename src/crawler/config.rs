use std::sync::Arc;

use super::extract::ScopeFilter;

/// Default timeout for page requests in seconds
pub const PAGE_REQUEST_TIMEOUT_SEC: u64 = 10;
/// Default number of pages fetched concurrently in one round
pub const DEFAULT_BATCH_SIZE: usize = 500;
/// Marker that opens the main-content region of a Wikipedia article
pub const DEFAULT_CONTENT_START: &str = "bodyContent";
/// Marker that closes the main-content region of a Wikipedia article
pub const DEFAULT_CONTENT_END: &str = "footer";

/// Substrings delimiting the part of a page that links are taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMarkers {
    pub start: String,
    pub end: String,
}

impl ContentMarkers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for ContentMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_START, DEFAULT_CONTENT_END)
    }
}

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub batch_size: usize,
    pub request_timeout_sec: u64,
    pub scope: ScopeFilter,
    pub markers: ContentMarkers,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout_sec: PAGE_REQUEST_TIMEOUT_SEC,
            scope: ScopeFilter::wikipedia(),
            markers: ContentMarkers::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    pub fn with_scope(mut self, scope: ScopeFilter) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_markers(mut self, markers: ContentMarkers) -> Self {
        self.markers = markers;
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
