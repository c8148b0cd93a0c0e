use domain_vector::{VectorMatch, VectorMetadata};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Search request body.
///
/// `query` is kept as raw JSON so a missing or non-string value can be
/// answered with a 400 rather than a deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "fintech startups hiring in London")]
    pub query: serde_json::Value,
    #[serde(default = "default_page")]
    #[schema(example = 1)]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[schema(example = 10)]
    pub limit: u32,
}

/// One ranked company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchMatch {
    pub score: f32,
    pub id: String,
    #[serde(flatten)]
    pub metadata: VectorMetadata,
}

impl From<VectorMatch> for SearchMatch {
    fn from(m: VectorMatch) -> Self {
        Self {
            score: m.score,
            id: m.id,
            metadata: m.metadata,
        }
    }
}

/// Successful search: one page of the matches fetched for the query
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub success: bool,
    pub page: u32,
    pub limit: u32,
    /// Matches fetched from the index, before pagination
    pub total: usize,
    pub matches: Vec<SearchMatch>,
}

/// Failed search, still answered with 200
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchFailure {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SearchResponse {
    Results(SearchResults),
    Failure(SearchFailure),
}

impl SearchResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        SearchResponse::Failure(SearchFailure {
            success: false,
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchResponse::Results(_))
    }
}
