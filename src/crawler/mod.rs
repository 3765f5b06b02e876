pub mod config;
pub mod detect;
pub mod error;
pub mod expand;
pub mod extract;
pub mod fetch;
pub mod runner;
pub mod state;


pub use config::{ContentMarkers, CrawlerConfig, CrawlerConfigRef, DEFAULT_BATCH_SIZE, PAGE_REQUEST_TIMEOUT_SEC};
pub use detect::{check_and_trace, Path};
pub use error::{CrawlError, FetchError, LinkResolutionError};
pub use expand::{Crawler, RoundResult};
pub use extract::{extract_links, resolve_link, ScopeFilter};
pub use fetch::PageFetcher;
pub use runner::{search, SearchOutcome, SearchResult, SearchState};
pub use state::FrontierState;
