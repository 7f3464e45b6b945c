#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crypto_scanner::api::{OnchainSource, PriceSource};
use crypto_scanner::config::Config;
use crypto_scanner::models::{OnchainRecord, PriceRecord, WatchlistEntry};

pub const API_KEY: &str = "test-key";
pub const BINANCE: &str = "0xbe0eb53f46cd790cd13851d5eff43d12404d33e8";
pub const PRIME_CONTRACT: &str = "0xb23d80f5fefcddaa212212f028021b41ded428cf";
pub const BROKEN_CONTRACT: &str = "0x00000000000000000000000000000000000000ff";
pub const QUIET_CONTRACT: &str = "0x00000000000000000000000000000000000000ee";
pub const MALFORMED_CONTRACT: &str = "0x00000000000000000000000000000000000000dd";

// Helper to create a config whose intervals are zero and whose output
// lands in `dir`. The watchlist is filled in by the caller.
pub fn create_test_config(dir: &Path, watchlist: Vec<WatchlistEntry>) -> Config {
    let mut config = Config::from_toml(
        r#"
watchlist = []

[scan]
entry_interval_ms = 0
onchain_interval_ms = 0

[[exchanges]]
label = "binance"
address = "0xBE0EB53F46CD790CD13851D5EFF43D12404D33E8"
"#,
    )
    .expect("test config parses");
    config.output.dir = dir.to_path_buf();
    config.watchlist = watchlist;
    config
}

pub fn point_at_stub(config: &mut Config, addr: SocketAddr) {
    config.api.coingecko_base_url = format!("http://{}/api/v3", addr);
    config.api.etherscan_base_url = format!("http://{}/explorer", addr);
    config.api.github_base_url = format!("http://{}", addr);
    config.api.request_timeout_secs = 1;
}

/// Price source backed by a fixed table; unknown ids fail like a dead endpoint.
#[derive(Debug, Default)]
pub struct FakePrices {
    pub prices: HashMap<String, PriceRecord>,
}

impl FakePrices {
    pub fn with(mut self, market_id: &str, price: f64, change_24h: f64) -> Self {
        self.prices.insert(
            market_id.to_string(),
            PriceRecord {
                current_price: Some(price),
                change_24h: Some(change_24h),
                change_7d: Some(change_24h * 2.0),
                market_cap: Some(price * 1_000_000.0),
                volume_24h: Some(price * 10_000.0),
            },
        );
        self
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn price(&self, market_id: &str) -> PriceRecord {
        self.prices.get(market_id).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct FakeOnchain {
    pub records: HashMap<String, OnchainRecord>,
}

impl FakeOnchain {
    pub fn with(mut self, contract: &str, record: OnchainRecord) -> Self {
        self.records.insert(contract.to_string(), record);
        self
    }
}

#[async_trait]
impl OnchainSource for FakeOnchain {
    async fn onchain(&self, contract_address: &str) -> OnchainRecord {
        self.records.get(contract_address).copied().unwrap_or_default()
    }
}

/// Reads a CSV back into (header, rows).
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("csv opens");
    let header = reader
        .headers()
        .expect("csv header")
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("csv record").iter().map(String::from).collect())
        .collect();
    (header, rows)
}

fn coin_reply(id: &str) -> warp::reply::Response {
    match id {
        "aaa-coin" => warp::reply::json(&json!({
            "id": "aaa-coin",
            "market_data": {
                "current_price": {"usd": 1.23},
                "price_change_percentage_24h": 5.0
            }
        }))
        .into_response(),
        "echelon-prime" => warp::reply::json(&json!({
            "id": "echelon-prime",
            "market_data": {
                "current_price": {"usd": 9.5, "eur": 8.7},
                "price_change_percentage_24h": -1.5,
                "price_change_percentage_7d": 12.25,
                "market_cap": {"usd": 450000000.0},
                "total_volume": {"usd": 21000000.0}
            }
        }))
        .into_response(),
        "garbled-coin" => warp::reply::with_status("<html>oops</html>", StatusCode::OK).into_response(),
        _ => warp::reply::with_status(
            warp::reply::json(&json!({"error": "coin not found"})),
            StatusCode::NOT_FOUND,
        )
        .into_response(),
    }
}

fn explorer_reply(query: &HashMap<String, String>) -> warp::reply::Response {
    let param = |k: &str| query.get(k).map(String::as_str).unwrap_or_default();
    if param("apikey") != API_KEY {
        return warp::reply::json(&json!({
            "status": "0", "message": "NOTOK", "result": "Invalid API Key"
        }))
        .into_response();
    }
    if param("contractaddress") == BROKEN_CONTRACT {
        return warp::reply::with_status("bad gateway", StatusCode::BAD_GATEWAY).into_response();
    }

    let body: Value = match (param("module"), param("action")) {
        ("account", "tokentx") if param("contractaddress") == QUIET_CONTRACT => {
            json!({"status": "0", "message": "No transactions found", "result": []})
        }
        ("account", "tokentx") if param("contractaddress") == MALFORMED_CONTRACT => {
            json!({"status": "1", "message": "OK", "result": [{"to": 5}]})
        }
        ("token", "tokenholdercount") => json!({"status": "1", "message": "OK", "result": "12873"}),
        ("account", "tokentx") => json!({
            "status": "1",
            "message": "OK",
            "result": [
                {"hash": "0x01", "from": "0xaaaa000000000000000000000000000000000001", "to": BINANCE},
                {"hash": "0x02", "from": "0xaaaa000000000000000000000000000000000002", "to": "0xaaaa000000000000000000000000000000000003"},
                {"hash": "0x03", "from": "0xaaaa000000000000000000000000000000000004", "to": "0xBE0EB53F46CD790CD13851D5EFF43D12404D33E8"},
                {"hash": "0x04", "from": BINANCE, "to": "0xaaaa000000000000000000000000000000000005"}
            ]
        }),
        _ => json!({"status": "0", "message": "NOTOK", "result": "Unknown action"}),
    };
    warp::reply::json(&body).into_response()
}

fn repo_reply(owner: &str, name: &str) -> warp::reply::Response {
    match (owner, name) {
        ("bittensor", "bittensor") | ("busy", "repo") => warp::reply::json(&json!({
            "full_name": format!("{}/{}", owner, name),
            "stargazers_count": 1200,
            "forks_count": 300,
            "open_issues_count": 45
        }))
        .into_response(),
        _ => warp::reply::with_status(
            warp::reply::json(&json!({"message": "Not Found"})),
            StatusCode::NOT_FOUND,
        )
        .into_response(),
    }
}

fn commit_activity_reply(owner: &str, name: &str) -> warp::reply::Response {
    match (owner, name) {
        ("bittensor", "bittensor") => {
            let weeks: Vec<Value> = (1..=6)
                .map(|t| json!({"week": 1_700_000_000 + t * 604_800, "total": t, "days": [0, 0, 0, 0, 0, 0, t]}))
                .collect();
            warp::reply::json(&weeks).into_response()
        }
        _ => warp::reply::with_status(warp::reply::json(&json!({})), StatusCode::ACCEPTED).into_response(),
    }
}

/// Serves canned CoinGecko, Etherscan and GitHub answers on an ephemeral
/// loopback port. `slow-coin` answers after two seconds.
pub async fn spawn_stub_providers() -> SocketAddr {
    let coins = warp::path!("api" / "v3" / "coins" / String).and_then(|id: String| async move {
        if id == "slow-coin" {
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        Ok::<_, warp::Rejection>(coin_reply(&id))
    });
    let explorer = warp::path!("explorer")
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| explorer_reply(&query));
    let repo = warp::path!("repos" / String / String)
        .map(|owner: String, name: String| repo_reply(&owner, &name));
    let commits = warp::path!("repos" / String / String / "stats" / "commit_activity")
        .map(|owner: String, name: String| commit_activity_reply(&owner, &name));

    let routes = coins.or(explorer).or(repo).or(commits);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}
