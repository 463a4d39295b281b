//! Search backend client.
//!
//! Issues one GraphQL POST per badge render and folds every failure mode into
//! a `SearchOutcome` variant. The caller must always be able to render some
//! badge, so this module never returns `Err`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const SEARCH_QUERY: &str = r#"
query BadgeSearch($query: String!) {
    search(query: $query) {
        results {
            resultCount
            limitHit
            cloning { name }
            missing { name }
        }
    }
}
"#;

/// Normalized result of asking the backend about one search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search string was supplied; the backend was not called.
    NoQuery,
    /// The HTTP call did not succeed (non-2xx status or network failure).
    TransportError { status_text: String },
    /// The call succeeded but the envelope carried no usable search result.
    GraphqlError { messages: Vec<String> },
    Success {
        result_count: i64,
        limit_hit: bool,
        missing: usize,
        cloning: usize,
    },
}

/// Seam between the badge decision logic and the live GraphQL client.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> SearchOutcome;
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: SearchVariables<'a>,
}

#[derive(Serialize)]
struct SearchVariables<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default)]
    errors: Option<Vec<ResponseError>>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(default)]
    search: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    results: SearchResults,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    result_count: i64,
    limit_hit: bool,
    #[serde(default)]
    cloning: Vec<RepositoryRef>,
    #[serde(default)]
    missing: Vec<RepositoryRef>,
}

#[derive(Debug, Deserialize)]
struct RepositoryRef {
    name: String,
}

/// GraphQL search client for a Sourcegraph-compatible backend.
pub struct SourcegraphClient {
    http: Client,
    api_url: String,
}

impl SourcegraphClient {
    /// Create a client against the given GraphQL endpoint.
    ///
    /// The outbound call carries a 10 second timeout; a badge render should
    /// fail visibly rather than hang on a stuck backend.
    pub fn new(api_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { http, api_url })
    }
}

#[async_trait]
impl SearchBackend for SourcegraphClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        let body = GraphqlRequest {
            query: SEARCH_QUERY,
            variables: SearchVariables { query },
        };

        let response = match self.http.post(&self.api_url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "search backend unreachable");
                return SearchOutcome::TransportError {
                    status_text: "backend unreachable".to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(%status, body = %text, "search backend returned an error status");
            let status_text = status
                .canonical_reason()
                .map(str::to_lowercase)
                .unwrap_or_else(|| status.as_str().to_string());
            return SearchOutcome::TransportError { status_text };
        }

        let text = response.text().await.unwrap_or_default();
        let envelope: GraphqlResponse = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(error = %e, body = %text, "malformed search response");
                return SearchOutcome::GraphqlError { messages: vec![] };
            }
        };

        let results = match envelope.data.and_then(|d| d.search) {
            Some(search) => search.results,
            None => {
                let messages: Vec<String> = envelope
                    .errors
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.message)
                    .collect();
                error!(errors = ?messages, "search backend returned no result");
                return SearchOutcome::GraphqlError { messages };
            }
        };

        if !results.missing.is_empty() || !results.cloning.is_empty() {
            debug!(
                missing = ?results.missing.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
                cloning = ?results.cloning.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
                "search degraded by unavailable repositories"
            );
        }

        SearchOutcome::Success {
            result_count: results.result_count,
            limit_hit: results.limit_hit,
            missing: results.missing.len(),
            cloning: results.cloning.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_results_parses() {
        let raw = r#"{
            "data": {
                "search": {
                    "results": {
                        "resultCount": 42,
                        "limitHit": true,
                        "cloning": [{"name": "github.com/a/b"}],
                        "missing": []
                    }
                }
            }
        }"#;
        let envelope: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let results = envelope.data.unwrap().search.unwrap().results;
        assert_eq!(results.result_count, 42);
        assert!(results.limit_hit);
        assert_eq!(results.cloning.len(), 1);
        assert_eq!(results.cloning[0].name, "github.com/a/b");
        assert!(results.missing.is_empty());
    }

    #[test]
    fn envelope_with_errors_parses() {
        let raw = r#"{"data": {"search": null}, "errors": [{"message": "bad query"}]}"#;
        let envelope: GraphqlResponse = serde_json::from_str(raw).unwrap();
        assert!(envelope.data.unwrap().search.is_none());
        let errors = envelope.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "bad query");
    }

    #[test]
    fn empty_envelope_parses() {
        let envelope: GraphqlResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.errors.is_none());
    }
}
