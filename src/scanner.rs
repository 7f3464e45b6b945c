use log::{info, warn};
use std::sync::Arc;

use crate::api::{CoinGeckoClient, EtherscanClient, GitHubClient};
use crate::cli::Command;
use crate::collectors::{
    run_collectors, Collector, DevActivityCollector, OnchainCollector, RunSummary, SnapshotDriver,
};
use crate::config::{Config, Secrets};
use crate::error::Result;

/// Wires the provider clients to the collectors for one run.
pub struct Scanner {
    market: SnapshotDriver,
    onchain: OnchainCollector,
    dev: DevActivityCollector,
}

impl Scanner {
    pub fn new(config: &Config, secrets: &Secrets) -> Result<Self> {
        if secrets.etherscan_api_key.is_none() {
            warn!("ETHERSCAN_API_KEY not set, on-chain columns will be empty");
        }

        let exchanges = config.exchange_allow_list()?;
        if exchanges.is_empty() {
            warn!("No exchange addresses configured, exchange transfer counts will be 0");
        }

        let prices = Arc::new(CoinGeckoClient::new(&config.api, secrets.coingecko_api_key.clone())?);
        let explorer = Arc::new(EtherscanClient::new(
            &config.api,
            &config.scan,
            exchanges,
            secrets.etherscan_api_key.clone(),
        )?);
        let github = Arc::new(GitHubClient::new(&config.api, secrets.github_token.clone())?);

        Ok(Self {
            market: SnapshotDriver::new(config, prices, explorer.clone()),
            onchain: OnchainCollector::new(config, explorer),
            dev: DevActivityCollector::new(config, github),
        })
    }

    pub async fn run(&self, command: Command) -> RunSummary {
        let market: &dyn Collector = &self.market;
        let onchain: &dyn Collector = &self.onchain;
        let dev: &dyn Collector = &self.dev;
        let collectors = match command {
            Command::Market => vec![market],
            Command::Onchain => vec![onchain],
            Command::Dev => vec![dev],
            Command::All => vec![market, onchain, dev],
        };
        info!("Starting {:?} run with {} collector(s)", command, collectors.len());
        run_collectors(&collectors).await
    }
}
