use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::models::{DevActivityRecord, OnchainRecord, PriceRecord};

pub mod coingecko;
pub mod etherscan;
pub mod github;
pub mod types;

pub use coingecko::CoinGeckoClient;
pub use etherscan::EtherscanClient;
pub use github::GitHubClient;

const USER_AGENT: &str = concat!("crypto-scanner/", env!("CARGO_PKG_VERSION"));

/// Market price lookup. Implementations never fail: problems are logged and
/// reported as an all-null record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn price(&self, market_id: &str) -> PriceRecord;
}

/// Holder/transfer lookup for a token contract. Same failure contract as
/// [`PriceSource`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OnchainSource: Send + Sync {
    async fn onchain(&self, contract_address: &str) -> OnchainRecord;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepoStatsSource: Send + Sync {
    async fn repo_stats(&self, repo: &str) -> DevActivityRecord;
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
