//! Dataset collectors and the runner that composes them.
//!
//! Every collector walks the watchlist, writes one CSV and reports how that
//! went. The runner executes them one after another; a failed collector is
//! logged and the next one still runs.

use async_trait::async_trait;
use log::{error, info, warn};
use std::path::PathBuf;

use crate::error::Result;
use crate::snapshot::WriteOutcome;

pub mod dev_activity;
pub mod market;
pub mod onchain;

pub use dev_activity::DevActivityCollector;
pub use market::SnapshotDriver;
pub use onchain::OnchainCollector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorStatus {
    Written { path: PathBuf, rows: usize },
    SkippedEmpty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorReport {
    pub name: &'static str,
    pub status: CollectorStatus,
}

impl CollectorReport {
    /// Folds the writer result into a report, logging write failures.
    pub fn from_write(name: &'static str, result: Result<WriteOutcome>) -> Self {
        let status = match result {
            Ok(WriteOutcome::Written { path, rows }) => CollectorStatus::Written { path, rows },
            Ok(WriteOutcome::SkippedEmpty) => CollectorStatus::SkippedEmpty,
            Err(e) => {
                error!("{} collector could not write its output: {}", name, e);
                CollectorStatus::Failed(e.to_string())
            }
        };
        Self { name, status }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, CollectorStatus::Failed(_))
    }
}

#[async_trait]
pub trait Collector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch, assemble and write. Never panics on upstream failures.
    async fn collect(&self) -> CollectorReport;
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<CollectorReport>,
}

impl RunSummary {
    /// True only when something ran and every collector failed.
    pub fn is_failure(&self) -> bool {
        !self.reports.is_empty() && self.reports.iter().all(CollectorReport::is_failed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CollectorReport> {
        self.reports.iter().filter(|r| r.is_failed())
    }
}

pub async fn run_collectors(collectors: &[&dyn Collector]) -> RunSummary {
    let mut summary = RunSummary::default();
    for collector in collectors {
        info!("Running {} collector", collector.name());
        let report = collector.collect().await;
        match &report.status {
            CollectorStatus::Written { path, rows } => {
                info!("{} collector wrote {} rows to {}", report.name, rows, path.display())
            }
            CollectorStatus::SkippedEmpty => {
                warn!("{} collector produced no rows", report.name)
            }
            CollectorStatus::Failed(reason) => {
                error!("{} collector failed: {}", report.name, reason)
            }
        }
        summary.reports.push(report);
    }
    summary
}
