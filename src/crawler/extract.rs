use std::collections::HashSet;

use log2::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::LinkResolutionError;

static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="(.*?)""#).expect("href pattern is a valid regex"));

/// Substrings every in-scope link must contain
pub const WIKIPEDIA_INCLUDE: &[&str] = &["en.wikipedia", "wiki"];

/// Substrings no in-scope link may contain
pub const WIKIPEDIA_EXCLUDE: &[&str] = &[
    ".m.",
    "index",
    "/File:",
    "/Category:",
    "/Talk:",
    "/Wikipedia:",
    "/Template:",
    "/Help:",
    "/Special:",
    "/static/",
    "/w/",
    "stats.wikimedia",
    "/UTC",
    "/Template_talk:",
];

/// Include/exclude substring policy deciding which links are followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ScopeFilter {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// English Wikipedia articles only
    pub fn wikipedia() -> Self {
        Self::new(
            WIKIPEDIA_INCLUDE.iter().copied(),
            WIKIPEDIA_EXCLUDE.iter().copied(),
        )
    }

    /// `page` acts as one more exclude entry so a page never links to itself
    pub fn is_in_scope(&self, link: &str, page: &str) -> bool {
        self.include.iter().all(|inc| link.contains(inc.as_str()))
            && self.exclude.iter().all(|exc| !link.contains(exc.as_str()))
            && !link.contains(page)
    }
}

/// Joins `href` onto `base` with standard relative-reference rules.
/// Absolute references replace the base entirely.
pub fn resolve_link(href: &str, base: &Url) -> Result<Url, LinkResolutionError> {
    base.join(href).map_err(|source| LinkResolutionError {
        href: href.to_string(),
        base: base.clone(),
        source,
    })
}

/// Collects every in-scope link referenced by an `href="..."` attribute in `body`.
pub fn extract_links(body: &str, base: &Url, scope: &ScopeFilter) -> HashSet<Url> {
    let mut found = HashSet::new();

    for capture in HREF_RE.captures_iter(body) {
        let href = &capture[1];
        match resolve_link(href, base) {
            Ok(link) => {
                if scope.is_in_scope(link.as_str(), base.as_str()) {
                    found.insert(link);
                } else {
                    debug!("Skipped out-of-scope link: {}", link);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    found
}
