use std::sync::Arc;

use domain_vector::{EmbeddingProvider, VectorIndex, VectorQuery};

use crate::error::{SearchError, SearchResult};
use crate::interpreter::QueryInterpreter;
use crate::models::{SearchMatch, SearchResponse, SearchResults};
use crate::pagination::paginate;

pub const DEFAULT_TOP_K: u32 = 100;
pub const MAX_TOP_K: u32 = 1000;

/// interpret → embed → query → paginate
pub struct SearchService {
    interpreter: Arc<dyn QueryInterpreter>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    default_top_k: u32,
}

impl SearchService {
    pub fn new(
        interpreter: Arc<dyn QueryInterpreter>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            interpreter,
            embedder,
            index,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_default_top_k(mut self, top_k: u32) -> Self {
        self.default_top_k = top_k.clamp(1, MAX_TOP_K);
        self
    }

    /// Run a search, reporting failures in the response body
    pub async fn search(&self, query: &str, page: u32, limit: u32) -> SearchResponse {
        match self.try_search(query, page, limit).await {
            Ok(results) => SearchResponse::Results(results),
            Err(e) => {
                tracing::error!(error = %e, "Search failed");
                SearchResponse::failure(e.to_string())
            }
        }
    }

    pub async fn try_search(&self, query: &str, page: u32, limit: u32) -> SearchResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation("Query is required".to_string()));
        }

        let structured = self.interpreter.interpret(query).await;
        let top_k = structured
            .top_k
            .map_or(self.default_top_k, |k| k.clamp(1, MAX_TOP_K));

        let embedding = self.embedder.embed(&structured.query_text).await?;

        let matches = self
            .index
            .query(VectorQuery::new(embedding.values, top_k).with_filter(structured.filter))
            .await?;

        let total = matches.len();
        let page = page.max(1);
        let matches = paginate(matches, page, limit)
            .into_iter()
            .map(SearchMatch::from)
            .collect();

        tracing::debug!(total, page, limit, top_k, "Search completed");

        Ok(SearchResults {
            success: true,
            page,
            limit,
            total,
            matches,
        })
    }
}
