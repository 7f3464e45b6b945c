use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};

use crate::api::types::{recent_commit_total, CommitWeek, GitHubRepo};
use crate::api::{build_http_client, RepoStatsSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::DevActivityRecord;

const RECENT_WEEKS: usize = 4;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(api: &ApiConfig, token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(api.request_timeout())?,
            token,
            base_url: api.github_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        debug!("GET {}", url);
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn fetch_repo(&self, repo: &str) -> Result<GitHubRepo> {
        let response = self.get(&format!("{}/repos/{}", self.base_url, repo)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Commits over the last four weeks. `Ok(None)` while GitHub is still
    /// computing the statistics (HTTP 202).
    pub async fn fetch_recent_commits(&self, repo: &str) -> Result<Option<u64>> {
        let url = format!("{}/repos/{}/stats/commit_activity", self.base_url, repo);
        let response = self.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::ACCEPTED || status == StatusCode::NO_CONTENT {
            debug!("Commit statistics for {} not ready yet", repo);
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await?;
        let weeks: Vec<CommitWeek> = serde_json::from_str(&body)?;
        Ok(Some(recent_commit_total(&weeks, RECENT_WEEKS)))
    }
}

#[async_trait]
impl RepoStatsSource for GitHubClient {
    async fn repo_stats(&self, repo: &str) -> DevActivityRecord {
        let mut record: DevActivityRecord = match self.fetch_repo(repo).await {
            Ok(info) => info.into(),
            Err(e) => {
                warn!("Repository lookup failed for {}: {}", repo, e);
                return DevActivityRecord::default();
            }
        };
        record.recent_commits = self.fetch_recent_commits(repo).await.unwrap_or_else(|e| {
            warn!("Commit activity lookup failed for {}: {}", repo, e);
            None
        });
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_record() {
        let api = ApiConfig {
            github_base_url: "http://127.0.0.1:1/".to_string(),
            request_timeout_secs: 2,
            ..ApiConfig::default()
        };
        let client = GitHubClient::new(&api, Some("token".to_string())).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:1");
        assert_eq!(client.repo_stats("bittensor/bittensor").await, DevActivityRecord::default());
    }
}
