use thiserror::Error;
use url::Url;

/// Failure to obtain the content region of a single page.
/// Never fatal to a search: the page contributes no links.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("content marker {0:?} not found")]
    MarkerNotFound(String),
}

/// A link reference that could not be joined onto its page URL
#[derive(Error, Debug)]
#[error("cannot resolve link {href:?} against {base}: {source}")]
pub struct LinkResolutionError {
    pub href: String,
    pub base: Url,
    #[source]
    pub source: url::ParseError,
}

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The adjacency map does not connect the target back to the start
    #[error("backward trace from {target} cannot reach {start}: {reason}")]
    InvariantViolation {
        start: Url,
        target: Url,
        reason: String,
    },
}
