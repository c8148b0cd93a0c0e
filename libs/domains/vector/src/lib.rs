//! Embeddings and vector storage for company search.
//!
//! ```text
//! ┌───────────────────┐      ┌───────────────────┐
//! │ EmbeddingProvider │      │    VectorIndex    │
//! │      (trait)      │      │      (trait)      │
//! └─────────┬─────────┘      └─────────┬─────────┘
//!           │            ┌─────────────┼──────────────┐
//! ┌─────────▼─────────┐  │             │              │
//! │  OpenAIProvider   │  PineconeIndex  QdrantIndex  InMemoryVectorIndex
//! └───────────────────┘
//! ```
//!
//! Filters use Pinecone's operator syntax (`$eq`, `$in`, `$gte`, `$lte`).
//! The Qdrant and in-memory backends translate or evaluate the same
//! [`MetadataFilter`], so callers never branch on the backend.
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vector::{
//!     EmbeddingProvider, OpenAIConfig, OpenAIProvider, VectorIndex, VectorIndexConfig, VectorQuery,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = OpenAIProvider::new(OpenAIConfig::from_env()?);
//! let index = VectorIndexConfig::from_env()?.build()?;
//! index.ensure_ready(embedder.model().dimension()).await?;
//!
//! let embedding = embedder.embed("fintech for freelancers").await?;
//! let matches = index.query(VectorQuery::new(embedding.values, 10)).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod memory;
pub mod models;
pub mod pinecone;
pub mod qdrant;

pub use config::{BackendConfig, VectorIndexConfig};
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{VectorError, VectorResult};
pub use index::{VectorBackend, VectorIndex};
pub use memory::InMemoryVectorIndex;
pub use models::{
    EmbeddingModel, EmbeddingResult, FieldCondition, FilterValue, MetadataFilter, VectorMatch,
    VectorMetadata, VectorQuery, VectorRecord,
};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use qdrant::{QdrantConfig, QdrantIndex};

#[cfg(any(test, feature = "mocks"))]
pub use embedding::MockEmbeddingProvider;
#[cfg(any(test, feature = "mocks"))]
pub use index::MockVectorIndex;
