//! Web search tool for agents that want outside context.
//!
//! Backed by the DuckDuckGo Instant Answer API, which needs no credential.

use async_trait::async_trait;
use serde::Deserialize;
use squad_common::{Result, SquadError};
use tracing::debug;

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
    fn name(&self) -> &str;
}

#[derive(Deserialize)]
struct DdgResponse {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

pub struct DuckDuckGoSearch {
    http_client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            max_results: 5,
        }
    }

    fn collect_results(response: DdgResponse, max_results: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        if !response.abstract_text.is_empty() {
            results.push(SearchResult {
                title: response.heading,
                snippet: response.abstract_text,
            });
        }

        for topic in response.related_topics {
            if results.len() >= max_results {
                break;
            }
            if topic.text.is_empty() {
                continue;
            }
            results.push(SearchResult {
                title: topic.first_url,
                snippet: topic.text,
            });
        }

        results
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchTool for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .http_client
            .get(DUCKDUCKGO_API_URL)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|e| SquadError::Agent(format!("DuckDuckGo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SquadError::Agent(format!(
                "DuckDuckGo API error {status}"
            )));
        }

        let ddg: DdgResponse = response
            .json()
            .await
            .map_err(|e| SquadError::Agent(format!("Failed to parse DuckDuckGo response: {e}")))?;

        let results = Self::collect_results(ddg, self.max_results);
        debug!(query = %query, results = results.len(), "DuckDuckGo search completed");
        Ok(results)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}
