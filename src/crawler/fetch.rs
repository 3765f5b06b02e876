use std::time::Duration;

use log2::debug;
use reqwest::Client;
use url::Url;

use super::config::{ContentMarkers, CrawlerConfig};
use super::error::FetchError;

/// Sole network boundary of the crawler.
/// One client (and so one connection pool) is shared by every request of a search.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
    markers: ContentMarkers,
}

impl PageFetcher {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.request_timeout_sec),
            markers: config.markers.clone(),
        }
    }

    /// GET `url` and return only its main-content region.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let html = response.text().await?;
        let content = content_region(&html, &self.markers)?;
        debug!("Fetched {} ({} bytes of content)", url, content.len());

        Ok(content.to_string())
    }

    /// Follows the redirects of a "random page" endpoint and returns where it landed.
    pub async fn resolve_random_page(&self, random_url: &Url) -> Result<Url, FetchError> {
        let response = self
            .client
            .get(random_url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        Ok(response.url().clone())
    }
}

/// Text after the first start marker, cut at the first end marker following it.
/// Without an end marker the rest of the page is kept.
pub fn content_region<'a>(html: &'a str, markers: &ContentMarkers) -> Result<&'a str, FetchError> {
    let start = html
        .find(markers.start.as_str())
        .ok_or_else(|| FetchError::MarkerNotFound(markers.start.clone()))?;
    let rest = &html[start + markers.start.len()..];

    Ok(match rest.find(markers.end.as_str()) {
        Some(end) => &rest[..end],
        None => rest,
    })
}
