use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::market::{DevActivityRecord, OnchainRecord, PriceRecord};

/// One line of the market snapshot CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub ticker: String,
    pub contract: Option<String>,
    pub price: PriceRecord,
    pub onchain: OnchainRecord,
    pub last_updated: DateTime<Utc>,
}

/// One line of the on-chain CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnchainRow {
    pub ticker: String,
    pub contract: String,
    pub onchain: OnchainRecord,
    pub last_updated: DateTime<Utc>,
}

/// One line of the dev-activity CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevActivityRow {
    pub ticker: String,
    pub repo: String,
    pub activity: DevActivityRecord,
    pub last_updated: DateTime<Utc>,
}

/// A row type with a fixed, explicitly ordered set of columns.
pub trait CsvRow {
    /// Cell values in header order. Nulls are empty strings.
    fn to_record(&self) -> Vec<String>;
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Whole floats keep a trailing `.0` so `5.0` is not written as `5`.
fn float_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

impl SnapshotRow {
    pub fn header(transfer_limit: usize) -> Vec<String> {
        let mut header: Vec<String> = ["Ticker", "Contract", "Price", "24h%", "7d%", "MarketCap", "24hVol"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(onchain_columns(transfer_limit));
        header.push("LastUpdated".to_string());
        header
    }
}

impl CsvRow for SnapshotRow {
    fn to_record(&self) -> Vec<String> {
        vec![
            self.ticker.clone(),
            self.contract.clone().unwrap_or_default(),
            float_cell(self.price.current_price),
            float_cell(self.price.change_24h),
            float_cell(self.price.change_7d),
            float_cell(self.price.market_cap),
            float_cell(self.price.volume_24h),
            cell(self.onchain.holder_count()),
            self.onchain.recent_transfer_count().to_string(),
            self.onchain.exchange_transfer_count().to_string(),
            timestamp(&self.last_updated),
        ]
    }
}

impl OnchainRow {
    pub fn header(transfer_limit: usize) -> Vec<String> {
        let mut header = vec!["Ticker".to_string(), "Contract".to_string()];
        header.extend(onchain_columns(transfer_limit));
        header.push("LastUpdated".to_string());
        header
    }
}

impl CsvRow for OnchainRow {
    fn to_record(&self) -> Vec<String> {
        vec![
            self.ticker.clone(),
            self.contract.clone(),
            cell(self.onchain.holder_count()),
            self.onchain.recent_transfer_count().to_string(),
            self.onchain.exchange_transfer_count().to_string(),
            timestamp(&self.last_updated),
        ]
    }
}

impl DevActivityRow {
    pub fn header() -> Vec<String> {
        ["Ticker", "Repo", "Stars", "Forks", "OpenIssues", "RecentCommits(4w)", "LastUpdated"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl CsvRow for DevActivityRow {
    fn to_record(&self) -> Vec<String> {
        vec![
            self.ticker.clone(),
            self.repo.clone(),
            cell(self.activity.stars),
            cell(self.activity.forks),
            cell(self.activity.open_issues),
            cell(self.activity.recent_commits),
            timestamp(&self.last_updated),
        ]
    }
}

fn onchain_columns(transfer_limit: usize) -> [String; 3] {
    [
        "Holders".to_string(),
        format!("RecentTransfers_{}", transfer_limit),
        format!("ExchangeTransferCount_{}", transfer_limit),
    ]
}
