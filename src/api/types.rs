//! Wire types for the provider APIs.
//!
//! Every field the scanner reads is an `Option` with `#[serde(default)]`, so
//! an absent field is `None` rather than a parse failure. A field present
//! with the wrong JSON type still fails the whole payload.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{DevActivityRecord, PriceRecord};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoCoin {
    #[serde(default)]
    pub market_data: Option<CoinGeckoMarketData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoinGeckoMarketData {
    pub current_price: Option<UsdValue>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub market_cap: Option<UsdValue>,
    pub total_volume: Option<UsdValue>,
}

/// Per-currency object; only the USD quote is consumed.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsdValue {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl From<CoinGeckoCoin> for PriceRecord {
    fn from(coin: CoinGeckoCoin) -> Self {
        let md = coin.market_data.unwrap_or_default();
        let usd = |v: Option<UsdValue>| v.and_then(|v| v.usd);
        PriceRecord {
            current_price: usd(md.current_price),
            change_24h: md.price_change_percentage_24h,
            change_7d: md.price_change_percentage_7d,
            market_cap: usd(md.market_cap),
            volume_24h: usd(md.total_volume),
        }
    }
}

/// Etherscan wraps every answer in `{status, message, result}`. On failure
/// `status` is `"0"` and `result` is an error string, so `result` is kept
/// untyped until the status has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Value,
}

impl EtherscanEnvelope {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// Error text to log when `is_ok` is false.
    pub fn error_text(&self) -> String {
        match &self.result {
            Value::String(s) if !s.is_empty() => format!("{}: {}", self.message, s),
            _ => self.message.clone(),
        }
    }

    /// Holder count, accepting either a numeric string or a JSON number.
    pub fn holder_count(&self) -> Option<u64> {
        if !self.is_ok() {
            return None;
        }
        match &self.result {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Transfer list, `None` when the status is not OK. An OK answer whose
    /// `result` is not a transfer array is an error.
    pub fn transfers(&self) -> serde_json::Result<Option<Vec<TokenTransfer>>> {
        if !self.is_ok() {
            return Ok(None);
        }
        Vec::<TokenTransfer>::deserialize(&self.result).map(Some)
    }

    /// Etherscan reports a contract without transfers as status `"0"`.
    pub fn is_no_transactions(&self) -> bool {
        self.message.starts_with("No transactions found")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenTransfer {
    pub to: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitHubRepo {
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub open_issues_count: Option<u64>,
}

impl From<GitHubRepo> for DevActivityRecord {
    fn from(repo: GitHubRepo) -> Self {
        DevActivityRecord {
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            recent_commits: None,
        }
    }
}

/// One bucket of `/stats/commit_activity` (oldest first).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommitWeek {
    pub week: i64,
    pub total: u64,
}

/// Sum of the `total` of the last `weeks` buckets.
pub fn recent_commit_total(activity: &[CommitWeek], weeks: usize) -> u64 {
    let start = activity.len().saturating_sub(weeks);
    activity[start..].iter().map(|w| w.total).sum()
}
