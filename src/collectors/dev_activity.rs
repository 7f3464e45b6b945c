use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::RepoStatsSource;
use crate::collectors::{Collector, CollectorReport};
use crate::config::Config;
use crate::error::Result;
use crate::models::{DevActivityRow, WatchlistEntry};
use crate::snapshot::{assemble_dev_row, CsvWriter, WriteOutcome};

/// GitHub popularity and commit activity for entries with a repository.
pub struct DevActivityCollector {
    watchlist: Vec<WatchlistEntry>,
    repos: Arc<dyn RepoStatsSource>,
    entry_interval: Duration,
    output: PathBuf,
}

impl DevActivityCollector {
    pub fn new(config: &Config, repos: Arc<dyn RepoStatsSource>) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            repos,
            entry_interval: config.scan.entry_interval(),
            output: config.output.dev_path(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub async fn collect_rows(&self) -> Vec<DevActivityRow> {
        let tracked: Vec<(&WatchlistEntry, &str)> = self
            .watchlist
            .iter()
            .filter_map(|e| e.github_repo.as_deref().map(|repo| (e, repo)))
            .collect();
        if tracked.len() < self.watchlist.len() {
            info!(
                "{} watchlist entries have no repository configured",
                self.watchlist.len() - tracked.len()
            );
        }

        let mut rows = Vec::with_capacity(tracked.len());
        for (idx, (entry, repo)) in tracked.iter().enumerate() {
            let activity = self.repos.repo_stats(repo).await;
            rows.push(assemble_dev_row(entry, repo, activity, Utc::now()));

            if idx + 1 < tracked.len() && !self.entry_interval.is_zero() {
                tokio::time::sleep(self.entry_interval).await;
            }
        }
        rows
    }

    pub fn write(&self, rows: &[DevActivityRow]) -> Result<WriteOutcome> {
        CsvWriter::write(&self.output, &DevActivityRow::header(), rows)
    }
}

#[async_trait]
impl Collector for DevActivityCollector {
    fn name(&self) -> &'static str {
        "dev"
    }

    async fn collect(&self) -> CollectorReport {
        let rows = self.collect_rows().await;
        CollectorReport::from_write(self.name(), self.write(&rows))
    }
}
