use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{GatewayError, SearchResult, WebSearch};

const ENDPOINT: &str = "https://api.tavily.com/search";

/// Web search gateway backed by the Tavily search API.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    /// Tavily search depth: "basic" or "advanced".
    search_depth: String,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            search_depth: "advanced".to_string(),
        }
    }

    /// Build from the `TAVILY_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, GatewayError> {
        std::env::var("TAVILY_API_KEY")
            .map(Self::new)
            .map_err(|_| GatewayError::MissingApiKey("TAVILY_API_KEY"))
    }

    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    content: String,
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        debug!("Tavily search: {query}");

        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": self.search_depth,
            "include_answer": false,
            "include_raw_content": false,
            "max_results": max_results,
        });

        let response = self
            .client
            .post(ENDPOINT)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: TavilyResponse = response.json().await.map_err(GatewayError::Transport)?;

        // An empty result set is a valid outcome, not an error.
        Ok(parsed
            .results
            .into_iter()
            .map(|result| SearchResult {
                title: result.title,
                url: result.url,
                content: result.content,
            })
            .collect())
    }
}
