use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{SearchApiResult, SearchError};
use crate::models::SearchResult;

pub const DEFAULT_SEARCH_API_URL: &str = "https://google.serper.dev/search";

/// Web search backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// At most `num` organic results for `query`.
    async fn search(&self, query: &str, num: u32) -> SearchApiResult<Vec<SearchResult>>;
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_url: String,
    /// `None` leaves search disabled.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl SearchConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: Some(api_key.into()),
            timeout: Duration::from_secs(10),
        }
    }
}

/// - `SEARCH_API_URL` (default `https://google.serper.dev/search`)
/// - `SEARCH_API_KEY` (optional; unset disables search)
/// - `UPSTREAM_TIMEOUT_SECS` (default 10)
impl FromEnv for SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env_or_default("SEARCH_API_URL", DEFAULT_SEARCH_API_URL),
            api_key: env_optional("SEARCH_API_KEY"),
            timeout: Duration::from_secs(env_parse("UPSTREAM_TIMEOUT_SECS", "10")?),
        })
    }
}

/// Serper.dev Google search API.
#[derive(Debug, Clone)]
pub struct SerperSearchProvider {
    client: Client,
    config: SearchConfig,
}

impl SerperSearchProvider {
    pub fn new(config: SearchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    position: Option<u32>,
}

#[async_trait]
impl SearchProvider for SerperSearchProvider {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, num: u32) -> SearchApiResult<Vec<SearchResult>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SearchError::NotConfigured)?;

        let response = self
            .client
            .post(&self.config.api_url)
            .header("X-API-KEY", api_key)
            .json(&SerperRequest { q: query, num })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamStatus(status.as_u16()));
        }

        let body: SerperResponse = response.json().await?;
        let results: Vec<SearchResult> = body
            .organic
            .into_iter()
            .take(num as usize)
            .enumerate()
            .map(|(i, hit)| SearchResult {
                title: hit.title,
                link: hit.link,
                snippet: hit.snippet,
                position: hit.position.unwrap_or(i as u32 + 1),
            })
            .collect();

        debug!(count = results.len(), "Search complete");
        Ok(results)
    }
}
