use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::api::types::CoinGeckoCoin;
use crate::api::{build_http_client, PriceSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::PriceRecord;

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Query parameters that trim the `/coins/{id}` payload down to market data.
const COIN_QUERY: [(&str, &str); 6] = [
    ("localization", "false"),
    ("tickers", "false"),
    ("market_data", "true"),
    ("community_data", "false"),
    ("developer_data", "false"),
    ("sparkline", "false"),
];

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(api: &ApiConfig, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(api.request_timeout())?,
            api_key,
            base_url: api.coingecko_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Single request, no retry. Errors are returned to the caller.
    pub async fn fetch_price(&self, market_id: &str) -> Result<PriceRecord> {
        let url = format!("{}/coins/{}", self.base_url, market_id);
        debug!("GET {}", url);

        let mut request = self.client.get(&url).query(&COIN_QUERY);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let coin: CoinGeckoCoin = serde_json::from_str(&body)?;
        if coin.market_data.is_none() {
            warn!("CoinGecko returned no market_data for {}", market_id);
        }
        Ok(coin.into())
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn price(&self, market_id: &str) -> PriceRecord {
        match self.fetch_price(market_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Price lookup failed for {}: {}", market_id, e);
                PriceRecord::default()
            }
        }
    }
}
