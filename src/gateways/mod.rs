//! External capabilities the engine calls but does not implement: a language
//! model for generation and a web search provider for sources.

mod json_utils;
mod openai;
mod tavily;

pub use json_utils::{extract_json_block, parse_structured};
pub use openai::OpenAiGateway;
pub use tavily::TavilySearch;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::SearchQuery;

/// A single web search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Errors surfaced by the concrete gateway implementations.
///
/// Authentication, quota, and transport problems must fail loud; callers
/// decide whether they are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("missing API key: {0} is not set")]
    MissingApiKey(&'static str),
}

/// Text-generation capability.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate free text from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate and parse a structured object.
    ///
    /// Malformed output (missing fields, no JSON at all) is an error, never
    /// a partial-field recovery.
    async fn generate_structured<T>(&self, prompt: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
        Self: Sized,
    {
        let response = self.generate(prompt).await?;
        parse_structured(&response)
    }
}

/// Web search capability.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Run one query, returning up to `max_results` hits.
    ///
    /// No results is an empty vec, not an error; errors are reserved for
    /// transport and provider failures.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// Run every non-null query concurrently and collect the hits in query order.
///
/// Null queries are a valid "no query generated" outcome and are skipped.
/// Any single search failure fails the whole batch.
pub async fn run_queries<S: WebSearch>(
    search: &S,
    queries: &[SearchQuery],
    max_results: usize,
) -> Result<Vec<Vec<SearchResult>>> {
    let pending: Vec<_> = queries
        .iter()
        .filter_map(|q| q.search_query.as_deref())
        .map(|q| search.search(q, max_results))
        .collect();

    futures::future::try_join_all(pending).await
}
