use std::collections::HashSet;

use futures::future::join_all;
use log2::{debug, info};
use url::Url;

use super::config::CrawlerConfigRef;
use super::extract::extract_links;
use super::fetch::PageFetcher;
use super::state::FrontierState;

/// What one round did to the frontier
#[derive(Debug, Default)]
pub struct RoundResult {
    /// URLs expanded in this round, in batch order
    pub consumed: Vec<Url>,
    /// Union of the links this round discovered for the first time
    pub newly_found: HashSet<Url>,
}

/// Fetches and extracts a batch of pages concurrently
pub struct Crawler {
    config: CrawlerConfigRef,
    fetcher: PageFetcher,
}

impl Crawler {
    pub fn new(config: CrawlerConfigRef) -> Self {
        let fetcher = PageFetcher::new(&config);
        Self { config, fetcher }
    }

    pub fn with_fetcher(config: CrawlerConfigRef, fetcher: PageFetcher) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &CrawlerConfigRef {
        &self.config
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    /// Expands every URL of `batch` that was not expanded before and waits
    /// for all of them before returning. A failed page yields no links but
    /// still counts as expanded.
    pub async fn expand_round(&self, state: &mut FrontierState, batch: Vec<Url>) -> RoundResult {
        let mut consumed = Vec::with_capacity(batch.len());
        for url in batch {
            if state.mark_expanded(url.clone()) {
                consumed.push(url);
            } else {
                debug!("Skipping already expanded {}", url);
            }
        }

        let pages = join_all(consumed.iter().map(|url| self.expand_page(url))).await;

        let mut newly_found = HashSet::new();
        for (url, links) in consumed.iter().zip(pages) {
            newly_found.extend(state.merge(url, links));
        }
        state.finish_round();

        info!(
            "Round {}: expanded {} pages, {} new links ({} discovered in total)",
            state.rounds(),
            consumed.len(),
            newly_found.len(),
            state.discovered_count()
        );

        RoundResult {
            consumed,
            newly_found,
        }
    }

    async fn expand_page(&self, url: &Url) -> HashSet<Url> {
        match self.fetcher.fetch(url).await {
            Ok(content) => {
                let links = extract_links(&content, url, &self.config.scope);
                info!("Found {} links for {}", links.len(), url);
                links
            }
            Err(e) => {
                debug!("Failed to fetch {}: {}", url, e);
                HashSet::new()
            }
        }
    }
}
