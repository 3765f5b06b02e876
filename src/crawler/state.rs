use std::collections::{HashMap, HashSet};
use url::Url;

/// Registers of one search attempt. Created empty, dropped when the attempt ends.
#[derive(Debug, Clone)]
pub struct FrontierState {
    start: Url,
    /// Every URL ever seen as a link target
    discovered: HashSet<Url>,
    /// Every URL fetched and merged
    expanded: HashSet<Url>,
    /// Source page -> in-scope links found on it
    adjacency: HashMap<Url, HashSet<Url>>,
    /// Hop count at which each URL was first discovered; the start is 0
    depth: HashMap<Url, usize>,
    /// Number of completed rounds
    rounds: usize,
}

impl FrontierState {
    pub fn new(start: Url) -> Self {
        let mut depth = HashMap::new();
        depth.insert(start.clone(), 0);

        Self {
            start,
            discovered: HashSet::new(),
            expanded: HashSet::new(),
            adjacency: HashMap::new(),
            depth,
            rounds: 0,
        }
    }

    /// Records the links found on `source` and returns those never seen before.
    ///
    /// Merging the same pair twice changes nothing; merges of different
    /// sources commute.
    pub fn merge(&mut self, source: &Url, links: HashSet<Url>) -> HashSet<Url> {
        if links.is_empty() {
            return HashSet::new();
        }

        let next_depth = self.depth_of(source).map_or(1, |d| d + 1);
        let newly_discovered: HashSet<Url> = links.difference(&self.discovered).cloned().collect();

        for link in &newly_discovered {
            self.depth.entry(link.clone()).or_insert(next_depth);
        }
        self.discovered.extend(newly_discovered.iter().cloned());
        self.adjacency.entry(source.clone()).or_insert(links);

        newly_discovered
    }

    /// Returns false if `url` had already been expanded
    pub fn mark_expanded(&mut self, url: Url) -> bool {
        self.expanded.insert(url)
    }

    pub fn finish_round(&mut self) {
        self.rounds += 1;
    }

    pub fn start(&self) -> &Url {
        &self.start
    }

    pub fn is_expanded(&self, url: &Url) -> bool {
        self.expanded.contains(url)
    }

    pub fn discovered(&self) -> &HashSet<Url> {
        &self.discovered
    }

    pub fn expanded(&self) -> &HashSet<Url> {
        &self.expanded
    }

    pub fn adjacency(&self) -> &HashMap<Url, HashSet<Url>> {
        &self.adjacency
    }

    pub fn depth_of(&self, url: &Url) -> Option<usize> {
        self.depth.get(url).copied()
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
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

    #[test]
    fn test_merge_reports_only_new_links() {
        let mut state = FrontierState::new(url("/a"));

        let first = state.merge(&url("/a"), links(&["/b", "/c"]));
        assert_eq!(first, links(&["/b", "/c"]));

        let second = state.merge(&url("/b"), links(&["/c", "/d"]));
        assert_eq!(second, links(&["/d"]));
        assert_eq!(state.discovered_count(), 3);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut once = FrontierState::new(url("/a"));
        once.merge(&url("/a"), links(&["/b", "/c"]));

        let mut twice = once.clone();
        let again = twice.merge(&url("/a"), links(&["/b", "/c"]));

        assert!(again.is_empty());
        assert_eq!(once.discovered(), twice.discovered());
        assert_eq!(once.adjacency(), twice.adjacency());
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut left = FrontierState::new(url("/a"));
        left.merge(&url("/a"), links(&["/b", "/c"]));
        left.merge(&url("/b"), links(&["/d"]));
        left.merge(&url("/c"), links(&["/d", "/e"]));

        let mut right = FrontierState::new(url("/a"));
        right.merge(&url("/a"), links(&["/b", "/c"]));
        right.merge(&url("/c"), links(&["/d", "/e"]));
        right.merge(&url("/b"), links(&["/d"]));

        assert_eq!(left.discovered(), right.discovered());
        assert_eq!(left.adjacency(), right.adjacency());
        assert_eq!(left.depth_of(&url("/d")), right.depth_of(&url("/d")));
    }

    #[test]
    fn test_empty_links_leave_no_adjacency() {
        let mut state = FrontierState::new(url("/a"));
        let new = state.merge(&url("/a"), HashSet::new());

        assert!(new.is_empty());
        assert!(state.adjacency().is_empty());
    }

    #[test]
    fn test_depth_tracks_first_discovery() {
        let mut state = FrontierState::new(url("/a"));
        state.merge(&url("/a"), links(&["/b"]));
        state.merge(&url("/b"), links(&["/c"]));
        state.merge(&url("/c"), links(&["/b"]));

        assert_eq!(state.depth_of(&url("/a")), Some(0));
        assert_eq!(state.depth_of(&url("/b")), Some(1));
        assert_eq!(state.depth_of(&url("/c")), Some(2));
    }

    #[test]
    fn test_mark_expanded_once() {
        let mut state = FrontierState::new(url("/a"));
        assert!(state.mark_expanded(url("/a")));
        assert!(!state.mark_expanded(url("/a")));
        assert_eq!(state.expanded_count(), 1);
    }
}
