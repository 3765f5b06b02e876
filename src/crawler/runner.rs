use std::collections::VecDeque;

use log2::{info, warn};
use url::Url;

use super::detect::{check_and_trace, Path};
use super::error::CrawlError;
use super::expand::Crawler;
use super::state::FrontierState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Found,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(Path),
    /// Every discovered page was expanded without reaching the target
    Exhausted,
}

/// Plain values handed to whoever reports on the attempt
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub discovered: usize,
    pub expanded: usize,
    pub rounds: usize,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&Path> {
        match &self.result {
            SearchResult::Found(path) => Some(path),
            SearchResult::Exhausted => None,
        }
    }

    fn from_state(result: SearchResult, state: &FrontierState) -> Self {
        Self {
            result,
            discovered: state.discovered_count(),
            expanded: state.expanded_count(),
            rounds: state.rounds(),
        }
    }
}

/// Breadth-first search from `start` until `target` shows up among the
/// links of an expanded page or no unexpanded page remains.
pub async fn search(crawler: &Crawler, start: Url, target: Url) -> Result<SearchOutcome, CrawlError> {
    let mut state = FrontierState::new(start.clone());

    if start == target {
        info!("Start and target are the same page: {}", start);
        let path = Path::new(vec![start]);
        return Ok(SearchOutcome::from_state(SearchResult::Found(path), &state));
    }

    let batch_size = crawler.config().batch_size.max(1);
    let mut current: VecDeque<Url> = VecDeque::from([start.clone()]);
    let mut next: VecDeque<Url> = VecDeque::new();
    let mut search_state = SearchState::Running;
    let mut found = None;

    info!("Searching for {} starting from {}", target, start);

    while search_state == SearchState::Running {
        let take = batch_size.min(current.len());
        let batch: Vec<Url> = current.drain(..take).collect();

        let round = crawler.expand_round(&mut state, batch).await;

        if let Some(path) = check_and_trace(&state, &target, &round.newly_found, &start)? {
            found = Some(path);
            search_state = SearchState::Found;
            continue;
        }

        next.extend(
            round
                .newly_found
                .into_iter()
                .filter(|url| !state.is_expanded(url)),
        );

        // Leftovers smaller than one batch are carried into the next layer
        if current.len() < batch_size {
            current.append(&mut next);
        }

        if current.is_empty() {
            search_state = SearchState::Exhausted;
        }
    }

    let result = match found {
        Some(path) => {
            info!("Found {} after {} rounds ({} hops)", target, state.rounds(), path.hops());
            SearchResult::Found(path)
        }
        None => {
            warn!("Frontier exhausted after {} rounds without reaching {}", state.rounds(), target);
            SearchResult::Exhausted
        }
    };

    Ok(SearchOutcome::from_state(result, &state))
}
