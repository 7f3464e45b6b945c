use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use crate::api::types::{EtherscanEnvelope, TokenTransfer};
use crate::api::{build_http_client, OnchainSource};
use crate::config::{ApiConfig, ScanConfig};
use crate::error::{Error, Result};
use crate::exchanges::ExchangeAllowList;
use crate::models::OnchainRecord;

/// Etherscan-compatible explorer client.
///
/// Each [`OnchainSource::onchain`] call issues a holder-count request and a
/// single page of the most recent token transfers, then sleeps for the
/// configured interval to stay under the free-tier rate limit.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    chain_id: u64,
    transfer_limit: usize,
    pause: Duration,
    exchanges: ExchangeAllowList,
}

impl EtherscanClient {
    pub fn new(
        api: &ApiConfig,
        scan: &ScanConfig,
        exchanges: ExchangeAllowList,
        api_key: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(api.request_timeout())?,
            api_key,
            base_url: api.etherscan_base_url.clone(),
            chain_id: api.etherscan_chain_id,
            transfer_limit: scan.transfer_limit,
            pause: scan.onchain_interval(),
            exchanges,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API key travels in the query string, so transport errors are
    /// stripped of their URL before they can reach a log line.
    async fn call(&self, params: &[(&str, String)]) -> Result<EtherscanEnvelope> {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let chain_id = self.chain_id.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("chainid", chain_id.as_str()), ("apikey", api_key)])
            .query(params)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await.map_err(redact)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn fetch_holder_count(&self, contract_address: &str) -> Result<u64> {
        debug!("Fetching holder count for {}", contract_address);
        let envelope = self
            .call(&[
                ("module", "token".to_string()),
                ("action", "tokenholdercount".to_string()),
                ("contractaddress", contract_address.to_string()),
            ])
            .await?;
        if !envelope.is_ok() {
            return Err(Error::ApiError(envelope.error_text()));
        }
        envelope
            .holder_count()
            .ok_or_else(|| Error::ApiInvalidData(format!("Unreadable holder count: {}", envelope.result)))
    }

    /// Most recent transfers, newest first, first page only.
    pub async fn fetch_recent_transfers(&self, contract_address: &str) -> Result<Vec<TokenTransfer>> {
        debug!(
            "Fetching {} recent transfers for {}",
            self.transfer_limit, contract_address
        );
        let envelope = self
            .call(&[
                ("module", "account".to_string()),
                ("action", "tokentx".to_string()),
                ("contractaddress", contract_address.to_string()),
                ("page", "1".to_string()),
                ("offset", self.transfer_limit.to_string()),
                ("sort", "desc".to_string()),
            ])
            .await?;
        if let Some(transfers) = envelope.transfers()? {
            return Ok(transfers);
        }
        if envelope.is_no_transactions() {
            debug!("No transfers yet for {}", contract_address);
            return Ok(Vec::new());
        }
        Err(Error::ApiError(envelope.error_text()))
    }

    pub fn summarize(&self, holder_count: Option<u64>, transfers: &[TokenTransfer]) -> OnchainRecord {
        let exchange_bound = self
            .exchanges
            .count_matches(transfers.iter().map(|t| t.to.as_str()));
        OnchainRecord::new(holder_count, transfers.len(), exchange_bound)
    }
}

fn redact(err: reqwest::Error) -> Error {
    Error::HttpError(err.without_url())
}

#[async_trait]
impl OnchainSource for EtherscanClient {
    async fn onchain(&self, contract_address: &str) -> OnchainRecord {
        if !self.has_api_key() {
            debug!("No explorer API key, skipping on-chain lookup for {}", contract_address);
            return OnchainRecord::default();
        }

        let holder_count = match self.fetch_holder_count(contract_address).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Holder count lookup failed for {}: {}", contract_address, e);
                None
            }
        };
        let transfers = self
            .fetch_recent_transfers(contract_address)
            .await
            .unwrap_or_else(|e| {
                warn!("Transfer lookup failed for {}: {}", contract_address, e);
                Vec::new()
            });

        let record = self.summarize(holder_count, &transfers);

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        record
    }
}
