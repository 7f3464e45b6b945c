use serde::{Deserialize, Serialize};

/// One tracked asset and its external identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub ticker: String,
    /// CoinGecko coin id, e.g. `bittensor`.
    pub market_id: String,
    #[serde(default)]
    pub contract_address: Option<String>,
    /// GitHub `owner/name` slug used by the dev-activity collector.
    #[serde(default)]
    pub github_repo: Option<String>,
}

impl WatchlistEntry {
    pub fn new(ticker: &str, market_id: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            market_id: market_id.to_string(),
            contract_address: None,
            github_repo: None,
        }
    }

    pub fn with_contract(mut self, contract_address: &str) -> Self {
        self.contract_address = Some(contract_address.to_string());
        self
    }

    pub fn with_repo(mut self, github_repo: &str) -> Self {
        self.github_repo = Some(github_repo.to_string());
        self
    }
}

/// USD market figures for one asset. `None` means the provider did not
/// supply the value or the request failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub current_price: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
}

impl PriceRecord {
    pub fn is_empty(&self) -> bool {
        self.current_price.is_none()
            && self.change_24h.is_none()
            && self.change_7d.is_none()
            && self.market_cap.is_none()
            && self.volume_24h.is_none()
    }
}

/// Holder and transfer metrics for one token contract.
///
/// The exchange-bound count can never exceed the number of transfers it was
/// computed from; `new` clamps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnchainRecord {
    holder_count: Option<u64>,
    recent_transfer_count: usize,
    exchange_transfer_count: usize,
}

impl OnchainRecord {
    pub fn new(
        holder_count: Option<u64>,
        recent_transfer_count: usize,
        exchange_transfer_count: usize,
    ) -> Self {
        Self {
            holder_count,
            recent_transfer_count,
            exchange_transfer_count: exchange_transfer_count.min(recent_transfer_count),
        }
    }

    pub fn holder_count(&self) -> Option<u64> {
        self.holder_count
    }

    pub fn recent_transfer_count(&self) -> usize {
        self.recent_transfer_count
    }

    pub fn exchange_transfer_count(&self) -> usize {
        self.exchange_transfer_count
    }
}

/// Repository popularity and commit activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevActivityRecord {
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub open_issues: Option<u64>,
    /// Commits summed over the last four weekly buckets.
    pub recent_commits: Option<u64>,
}
