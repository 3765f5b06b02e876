use std::fmt::Write as _;
use std::path::{Path as FsPath, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use url::Url;

use crate::crawler::SearchOutcome;

const HEADER: &str = "Number of links \t\t to find this page \t\t\t\t\t\t\t\t from this one \t\t\t\t\t\t\t\t full path";

/// One search attempt as it appears in the report
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub start: Url,
    pub target: Url,
    pub outcome: SearchOutcome,
}

impl AttemptRecord {
    pub fn line(&self) -> String {
        match self.outcome.path() {
            Some(path) => format!("{} \t {} \t {} \t\t {}", path.hops(), self.target, self.start, path),
            None => format!("- \t {} \t {} \t\t not found", self.target, self.start),
        }
    }
}

/// Results of all attempts of one run
#[derive(Debug, Default)]
pub struct Report {
    attempts: Vec<AttemptRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, start: Url, target: Url, outcome: SearchOutcome) {
        self.attempts.push(AttemptRecord { start, target, outcome });
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn total_discovered(&self) -> usize {
        self.attempts.iter().map(|a| a.outcome.discovered).sum()
    }

    pub fn total_expanded(&self) -> usize {
        self.attempts.iter().map(|a| a.outcome.expanded).sum()
    }

    /// Mean hop count over the attempts that reached their target
    pub fn average_hops(&self) -> Option<f64> {
        let hops: Vec<usize> = self
            .attempts
            .iter()
            .filter_map(|a| a.outcome.path().map(|p| p.hops()))
            .collect();
        if hops.is_empty() {
            return None;
        }
        Some(hops.iter().sum::<usize>() as f64 / hops.len() as f64)
    }

    pub fn render(&self, elapsed: Duration) -> String {
        let mut out = format!("\n{}\n\n", HEADER);
        for attempt in &self.attempts {
            let _ = writeln!(out, "{}", attempt.line());
        }

        let average = self
            .average_hops()
            .map_or_else(|| "-".to_string(), |avg| format!("{:.2}", avg));
        let _ = write!(
            out,
            "\n\tTotal number of urls found: {}\n\tTotal number of pages analyzed: {}\
             \n\tNumber of attempts: {}\n\tAverage number of links: {}\n\n\tTime Elapsed: {:.3?}",
            self.total_discovered(),
            self.total_expanded(),
            self.attempts.len(),
            average,
            elapsed
        );
        out
    }

    /// Writes the report into `dir` under a timestamped name and returns the file path
    pub fn write_to_dir(&self, dir: &FsPath, elapsed: Duration) -> Result<PathBuf> {
        let path = dir.join(report_file_name(Local::now()));
        std::fs::write(&path, self.render(elapsed))
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(path)
    }
}

pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("Wiki path search - {}.txt", now.format("%b %d %H-%M-%S"))
}
