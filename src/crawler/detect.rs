use std::collections::HashSet;
use std::fmt;

use log2::debug;
use url::Url;

use super::error::CrawlError;
use super::state::FrontierState;

/// Chain of pages from the start to the target, in forward order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Url>);

impl Path {
    pub fn new(urls: Vec<Url>) -> Self {
        Self(urls)
    }

    /// Number of links followed
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn urls(&self) -> &[Url] {
        &self.0
    }

    /// Last path segment of every page, e.g. `Cat` for `/wiki/Cat`
    pub fn titles(&self) -> Vec<String> {
        self.0.iter().map(page_title).collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.titles().join("  ->  "))
    }
}

pub fn page_title(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| url.as_str())
        .to_string()
}

/// Returns the path to `target` if this round discovered it.
///
/// Each step goes to the predecessor with the smallest discovery depth
/// (ties broken by URL order), so depth strictly decreases and the walk
/// ends within `state.rounds()` steps.
pub fn check_and_trace(
    state: &FrontierState,
    target: &Url,
    newly_found: &HashSet<Url>,
    start: &Url,
) -> Result<Option<Path>, CrawlError> {
    if !newly_found.contains(target) {
        return Ok(None);
    }

    let violation = |reason: String| CrawlError::InvariantViolation {
        start: start.clone(),
        target: target.clone(),
        reason,
    };

    let mut path = vec![target.clone()];
    let mut current = target.clone();

    while &current != start {
        if path.len() > state.rounds() {
            return Err(violation(format!(
                "trace exceeded {} completed rounds at {}",
                state.rounds(),
                current
            )));
        }

        let predecessor = state
            .adjacency()
            .iter()
            .filter(|(_, links)| links.contains(&current))
            .filter_map(|(source, _)| state.depth_of(source).map(|depth| (depth, source)))
            .min_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.as_str().cmp(b.as_str())))
            .map(|(_, source)| source.clone());

        match predecessor {
            Some(source) => {
                debug!("{} <- {}", current, source);
                path.push(source.clone());
                current = source;
            }
            None => return Err(violation(format!("no page links to {}", current))),
        }
    }

    path.reverse();
    Ok(Some(Path::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    fn links(paths: &[&str]) -> HashSet<Url> {
        paths.iter().map(|p| url(p)).collect()
    }

    /// a -> {b, c}, b -> {d}, c -> {d, e}, d -> {t}, e -> {d}
    fn setup_state() -> FrontierState {
        let mut state = FrontierState::new(url("/a"));
        state.merge(&url("/a"), links(&["/b", "/c"]));
        state.finish_round();
        state.merge(&url("/b"), links(&["/d"]));
        state.merge(&url("/c"), links(&["/d", "/e"]));
        state.finish_round();
        state.merge(&url("/e"), links(&["/d"]));
        state.merge(&url("/d"), links(&["/t"]));
        state.finish_round();
        state
    }

    #[test]
    fn test_not_in_round() {
        let state = setup_state();
        let result = check_and_trace(&state, &url("/t"), &links(&["/x"]), &url("/a")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_trace_is_valid_and_shortest() {
        let state = setup_state();
        let path = check_and_trace(&state, &url("/t"), &links(&["/t"]), &url("/a"))
            .unwrap()
            .unwrap();

        let urls = path.urls();
        assert_eq!(urls.first().unwrap(), &url("/a"));
        assert_eq!(urls.last().unwrap(), &url("/t"));
        for pair in urls.windows(2) {
            assert!(state.adjacency()[&pair[0]].contains(&pair[1]));
        }
        assert_eq!(path.hops(), 3);
        // b and c are both depth 1; b wins the tie by URL order
        assert_eq!(urls[1], url("/b"));
    }

    #[test]
    fn test_inconsistent_adjacency_is_violation() {
        let mut state = FrontierState::new(url("/a"));
        state.merge(&url("/a"), links(&["/b"]));
        state.finish_round();

        let result = check_and_trace(&state, &url("/t"), &links(&["/t"]), &url("/a"));
        assert!(matches!(result, Err(CrawlError::InvariantViolation { .. })));
    }

    #[test]
    fn test_titles_and_display() {
        let path = Path::new(vec![url("/wiki/Cat"), url("/wiki/Dog")]);
        assert_eq!(path.titles(), vec!["Cat".to_string(), "Dog".to_string()]);
        assert_eq!(path.to_string(), "Cat  ->  Dog");
        assert_eq!(path.hops(), 1);
    }
}
