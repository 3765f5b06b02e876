use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::crawler::config::{DEFAULT_CONTENT_END, DEFAULT_CONTENT_START};
use crate::crawler::extract::{WIKIPEDIA_EXCLUDE, WIKIPEDIA_INCLUDE};
use crate::crawler::{ContentMarkers, CrawlerConfig, ScopeFilter};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// All program arguments. `CrawlerConfig` only describes the crawler.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about = "Finds a chain of links between two Wikipedia articles", long_about = None)]
pub struct Config {
    /// Starting article; a random one is picked when omitted
    #[arg(short, long)]
    pub start_url: Option<String>,
    /// Target article; a random one is picked when omitted
    #[arg(short, long)]
    pub target_url: Option<String>,
    /// Endpoint that redirects to a random article
    #[arg(long, default_value = "https://en.wikipedia.org/wiki/Special:Random")]
    pub random_url: String,
    /// Number of pages fetched concurrently per round
    #[arg(short, long, default_value = "500")]
    pub batch_size: usize,
    /// Number of independent searches to run
    #[arg(short, long, default_value = "1")]
    pub attempts: usize,
    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    pub request_timeout: u64,
    /// Substring every followed link must contain (repeatable)
    #[arg(long = "include")]
    pub include: Vec<String>,
    /// Substring no followed link may contain (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
    /// Marker opening the part of a page links are taken from
    #[arg(long, default_value = DEFAULT_CONTENT_START)]
    pub content_start: String,
    /// Marker closing that part
    #[arg(long, default_value = DEFAULT_CONTENT_END)]
    pub content_end: String,
    /// Directory for the timestamped report file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }
        if self.attempts == 0 {
            anyhow::bail!("attempts must be greater than 0");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }
        Ok(())
    }

    /// Wikipedia filters stand in for whichever list was not given
    pub fn scope(&self) -> ScopeFilter {
        let include = if self.include.is_empty() {
            WIKIPEDIA_INCLUDE.iter().map(|s| s.to_string()).collect()
        } else {
            self.include.clone()
        };
        let exclude = if self.exclude.is_empty() {
            WIKIPEDIA_EXCLUDE.iter().map(|s| s.to_string()).collect()
        } else {
            self.exclude.clone()
        };
        ScopeFilter::new(include, exclude)
    }

    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::new()
            .with_batch_size(self.batch_size)
            .with_request_timeout(self.request_timeout)
            .with_scope(self.scope())
            .with_markers(ContentMarkers::new(&self.content_start, &self.content_end))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}
