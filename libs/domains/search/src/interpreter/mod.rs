mod llm;

use async_trait::async_trait;
use domain_vector::MetadataFilter;
use serde::{Deserialize, Serialize};

pub use llm::{DEFAULT_CHAT_MODEL, LlmConfig, LlmQueryInterpreter, TOOL_NAME};

/// A free-text query broken into embeddable text plus optional filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub query_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<MetadataFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl StructuredQuery {
    /// The raw text, unfiltered
    pub fn raw(query: &str) -> Self {
        Self {
            query_text: query.to_string(),
            filter: None,
            top_k: None,
        }
    }
}

/// Turns a user query into a [`StructuredQuery`].
///
/// Implementations never fail: on any problem they return
/// [`StructuredQuery::raw`].
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait QueryInterpreter: Send + Sync {
    async fn interpret(&self, query: &str) -> StructuredQuery;
}

/// Uses the query as-is
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughInterpreter;

#[async_trait]
impl QueryInterpreter for PassthroughInterpreter {
    async fn interpret(&self, query: &str) -> StructuredQuery {
        StructuredQuery::raw(query)
    }
}
