use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{OnchainSource, PriceSource};
use crate::collectors::{Collector, CollectorReport};
use crate::config::Config;
use crate::error::Result;
use crate::models::{OnchainRecord, SnapshotRow, WatchlistEntry};
use crate::snapshot::{assemble_row, CsvWriter, WriteOutcome};

/// Market snapshot: price plus on-chain metrics for every watchlist entry,
/// one row each, in watchlist order.
pub struct SnapshotDriver {
    watchlist: Vec<WatchlistEntry>,
    prices: Arc<dyn PriceSource>,
    onchain: Arc<dyn OnchainSource>,
    transfer_limit: usize,
    entry_interval: Duration,
    output: PathBuf,
}

impl SnapshotDriver {
    pub fn new(config: &Config, prices: Arc<dyn PriceSource>, onchain: Arc<dyn OnchainSource>) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            prices,
            onchain,
            transfer_limit: config.scan.transfer_limit,
            entry_interval: config.scan.entry_interval(),
            output: config.output.market_path(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Always yields exactly one row per watchlist entry.
    pub async fn collect_rows(&self) -> Vec<SnapshotRow> {
        let mut rows = Vec::with_capacity(self.watchlist.len());
        for (idx, entry) in self.watchlist.iter().enumerate() {
            debug!("Scanning {} ({})", entry.ticker, entry.market_id);

            let price = self.prices.price(&entry.market_id).await;
            let onchain = match &entry.contract_address {
                Some(contract) => self.onchain.onchain(contract).await,
                None => OnchainRecord::default(),
            };
            rows.push(assemble_row(entry, price, onchain, Utc::now()));

            if idx + 1 < self.watchlist.len() && !self.entry_interval.is_zero() {
                tokio::time::sleep(self.entry_interval).await;
            }
        }
        rows
    }

    pub fn write(&self, rows: &[SnapshotRow]) -> Result<WriteOutcome> {
        CsvWriter::write(&self.output, &SnapshotRow::header(self.transfer_limit), rows)
    }
}

#[async_trait]
impl Collector for SnapshotDriver {
    fn name(&self) -> &'static str {
        "market"
    }

    async fn collect(&self) -> CollectorReport {
        let rows = self.collect_rows().await;
        let priced = rows.iter().filter(|r| !r.price.is_empty()).count();
        info!("Market snapshot: {}/{} entries priced", priced, rows.len());
        CollectorReport::from_write(self.name(), self.write(&rows))
    }
}
