use log2::*;
use anyhow::{Context, Result};
use url::Url;
use std::sync::Arc;
use std::time::Instant;

use wikihop::config;
use wikihop::crawler::{self, Crawler, PageFetcher};
use wikihop::report::Report;

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// Uses the given URL, or asks the random endpoint for one
async fn pick_url(given: Option<&str>, fetcher: &PageFetcher, random_url: &Url) -> Result<Url> {
    match given {
        Some(url) => Url::parse(url).with_context(|| format!("Invalid URL: {}", url)),
        None => fetcher
            .resolve_random_page(random_url)
            .await
            .with_context(|| format!("Failed to resolve random page from {}", random_url)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("wikihop")) // include only modules having this pattern
        .compress(false)
        .level(cfg.log_level.to_string())
        .start();

    let random_url = Url::parse(&cfg.random_url)?;
    let crawler_config = Arc::new(cfg.crawler_config());
    let mut report = Report::new();

    for attempt in 1..=cfg.attempts {
        // fresh client and frontier for every attempt
        let crawler = Crawler::new(crawler_config.clone());
        let start_url = pick_url(cfg.start_url.as_deref(), crawler.fetcher(), &random_url).await?;
        let target_url = pick_url(cfg.target_url.as_deref(), crawler.fetcher(), &random_url).await?;

        info!("Attempt {}/{}: {} -> {}", attempt, cfg.attempts, start_url, target_url);

        match crawler::search(&crawler, start_url.clone(), target_url.clone()).await {
            Ok(outcome) => {
                match outcome.path() {
                    Some(path) => {
                        info!("Path found!");
                        for (i, url) in path.urls().iter().enumerate() {
                            info!("  {}: {}", i, url);
                        }
                        info!("Number of links between pages: {}", path.hops());
                    }
                    None => {
                        info!("No path found between {} and {}", start_url, target_url);
                    }
                }
                info!(
                    "urls found: {}, pages expanded: {}, rounds: {}",
                    outcome.discovered, outcome.expanded, outcome.rounds
                );
                report.record(start_url, target_url, outcome);
            }
            Err(e) => {
                error!("Search failed: {}", e);
                return Err(e.into());
            }
        }
    }

    let elapsed = START_TIME.elapsed();
    info!("{}", report.render(elapsed));

    if let Some(dir) = &cfg.output_dir {
        let path = report.write_to_dir(dir, elapsed)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}
