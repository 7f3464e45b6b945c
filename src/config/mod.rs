use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::exchanges::{ExchangeAddress, ExchangeAllowList};
use crate::models::WatchlistEntry;
use crate::validation::{validate_address, validate_market_id, validate_repo_slug, validate_ticker};

pub const DEFAULT_CONFIG_PATH: &str = "config/scanner.toml";
const MAX_TRANSFER_LIMIT: usize = 10_000;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub watchlist: Vec<WatchlistEntry>,
    #[serde(default)]
    pub exchanges: Vec<ExchangeAddress>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub coingecko_base_url: String,
    pub etherscan_base_url: String,
    pub etherscan_chain_id: u64,
    pub github_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
            etherscan_base_url: "https://api.etherscan.io/v2/api".to_string(),
            etherscan_chain_id: 1,
            github_base_url: "https://api.github.com".to_string(),
            request_timeout_secs: 20,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    /// Transfers requested per contract (first page only).
    pub transfer_limit: usize,
    /// Pause between watchlist entries.
    pub entry_interval_ms: u64,
    /// Pause after each contract's explorer requests.
    pub onchain_interval_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            transfer_limit: 100,
            entry_interval_ms: 1000,
            onchain_interval_ms: 1100,
        }
    }
}

impl ScanConfig {
    pub fn entry_interval(&self) -> Duration {
        Duration::from_millis(self.entry_interval_ms)
    }

    pub fn onchain_interval(&self) -> Duration {
        Duration::from_millis(self.onchain_interval_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub market_csv: String,
    pub onchain_csv: String,
    pub dev_csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            market_csv: "scan_output.csv".to_string(),
            onchain_csv: "onchain_output.csv".to_string(),
            dev_csv: "dev_output.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn market_path(&self) -> PathBuf {
        self.dir.join(&self.market_csv)
    }

    pub fn onchain_path(&self) -> PathBuf {
        self.dir.join(&self.onchain_csv)
    }

    pub fn dev_path(&self) -> PathBuf {
        self.dir.join(&self.dev_csv)
    }
}

/// API credentials. Read from the environment only, never from the config file.
#[derive(Clone, Default)]
pub struct Secrets {
    pub etherscan_api_key: Option<String>,
    pub coingecko_api_key: Option<String>,
    pub github_token: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            etherscan_api_key: var("ETHERSCAN_API_KEY"),
            coingecko_api_key: var("COINGECKO_API_KEY"),
            github_token: var("GITHUB_TOKEN"),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("etherscan_api_key", &self.etherscan_api_key.as_ref().map(|_| "***"))
            .field("coingecko_api_key", &self.coingecko_api_key.as_ref().map(|_| "***"))
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        fs::write(path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.transfer_limit == 0 || self.scan.transfer_limit > MAX_TRANSFER_LIMIT {
            return Err(Error::ConfigError(format!(
                "scan.transfer_limit must be between 1 and {}",
                MAX_TRANSFER_LIMIT
            )));
        }

        let mut tickers = HashSet::new();
        for (idx, entry) in self.watchlist.iter().enumerate() {
            let context = |e: Error| Error::ConfigError(format!("watchlist[{}]: {}", idx, e));
            validate_ticker(&entry.ticker).map_err(context)?;
            validate_market_id(&entry.market_id).map_err(context)?;
            if let Some(contract) = &entry.contract_address {
                validate_address(contract).map_err(context)?;
            }
            if let Some(repo) = &entry.github_repo {
                validate_repo_slug(repo).map_err(context)?;
            }
            if !tickers.insert(entry.ticker.as_str()) {
                return Err(Error::ConfigError(format!(
                    "watchlist[{}]: duplicate ticker '{}'",
                    idx, entry.ticker
                )));
            }
        }

        self.exchange_allow_list()?;
        Ok(())
    }

    pub fn exchange_allow_list(&self) -> Result<ExchangeAllowList> {
        ExchangeAllowList::from_entries(&self.exchanges)
    }
}
