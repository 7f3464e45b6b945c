use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::OnchainSource;
use crate::collectors::{Collector, CollectorReport};
use crate::config::Config;
use crate::error::Result;
use crate::models::{OnchainRow, WatchlistEntry};
use crate::snapshot::{assemble_onchain_row, CsvWriter, WriteOutcome};

/// Holder and transfer metrics for entries that have a contract address.
pub struct OnchainCollector {
    watchlist: Vec<WatchlistEntry>,
    onchain: Arc<dyn OnchainSource>,
    transfer_limit: usize,
    output: PathBuf,
}

impl OnchainCollector {
    pub fn new(config: &Config, onchain: Arc<dyn OnchainSource>) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            onchain,
            transfer_limit: config.scan.transfer_limit,
            output: config.output.onchain_path(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub async fn collect_rows(&self) -> Vec<OnchainRow> {
        let mut rows = Vec::new();
        for entry in &self.watchlist {
            let Some(contract) = entry.contract_address.as_deref() else {
                info!("{} has no contract address, skipping on-chain lookup", entry.ticker);
                continue;
            };
            debug!("Fetching on-chain metrics for {} ({})", entry.ticker, contract);
            // The source paces itself after each contract.
            let record = self.onchain.onchain(contract).await;
            rows.push(assemble_onchain_row(entry, contract, record, Utc::now()));
        }
        rows
    }

    pub fn write(&self, rows: &[OnchainRow]) -> Result<WriteOutcome> {
        CsvWriter::write(&self.output, &OnchainRow::header(self.transfer_limit), rows)
    }
}

#[async_trait]
impl Collector for OnchainCollector {
    fn name(&self) -> &'static str {
        "onchain"
    }

    async fn collect(&self) -> CollectorReport {
        let rows = self.collect_rows().await;
        CollectorReport::from_write(self.name(), self.write(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockOnchainSource;
    use crate::collectors::CollectorStatus;
    use crate::models::OnchainRecord;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_only_entries_with_contracts_are_collected() {
        let dir = tempdir().unwrap();
        let mut config = Config::from_toml("watchlist = []").unwrap();
        config.output.dir = dir.path().to_path_buf();
        config.watchlist = vec![
            WatchlistEntry::new("TAO", "bittensor"),
            WatchlistEntry::new("PYTH", "pyth-network")
                .with_contract("0x0c9c7712c83b3c70e7c5e11100d33d9401f18538"),
        ];

        let mut source = MockOnchainSource::new();
        source
            .expect_onchain()
            .times(1)
            .returning(|_| OnchainRecord::new(Some(7), 100, 4));
        let collector = OnchainCollector::new(&config, Arc::new(source));

        let rows = collector.collect_rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "PYTH");
        assert_eq!(rows[0].onchain.holder_count(), Some(7));
    }

    #[tokio::test]
    async fn test_no_contracts_skips_write() {
        let dir = tempdir().unwrap();
        let mut config = Config::from_toml("watchlist = []").unwrap();
        config.output.dir = dir.path().to_path_buf();
        config.watchlist = vec![WatchlistEntry::new("TAO", "bittensor")];

        let collector = OnchainCollector::new(&config, Arc::new(MockOnchainSource::new()));
        let report = collector.collect().await;

        assert_eq!(report.status, CollectorStatus::SkippedEmpty);
        assert!(!collector.output_path().exists());
    }
}
