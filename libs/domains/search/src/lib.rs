//! Search Domain
//!
//! Natural-language company search:
//!
//! ```text
//! query ─▶ QueryInterpreter ─▶ EmbeddingProvider ─▶ VectorIndex ─▶ paginate ─▶ response
//!          (LLM tool call      (embed once)         (filter, topK)
//!           or passthrough)
//! ```
//!
//! The interpreter never fails a search: when the language model is
//! unavailable or answers with something unusable, the raw query is searched
//! without a filter. The filters it may produce are limited to
//! [`fields::FILTER_FIELDS`].

pub mod config;
pub mod error;
pub mod fields;
pub mod handlers;
pub mod interpreter;
pub mod models;
pub mod pagination;
pub mod service;

pub use config::{InterpreterConfig, SearchConfig};
pub use error::{SearchError, SearchResult};
pub use handlers::ApiDoc;
pub use interpreter::{
    LlmConfig, LlmQueryInterpreter, PassthroughInterpreter, QueryInterpreter, StructuredQuery,
};
pub use models::{SearchFailure, SearchMatch, SearchRequest, SearchResponse, SearchResults};
pub use pagination::paginate;
pub use service::SearchService;

#[cfg(any(test, feature = "mocks"))]
pub use interpreter::MockQueryInterpreter;
