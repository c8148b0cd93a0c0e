use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{VectorMatch, VectorQuery, VectorRecord};

/// Which store backs a [`VectorIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorBackend {
    Pinecone,
    Qdrant,
    Memory,
}

impl VectorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorBackend::Pinecone => "pinecone",
            VectorBackend::Qdrant => "qdrant",
            VectorBackend::Memory => "memory",
        }
    }
}

impl std::str::FromStr for VectorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pinecone" => Ok(VectorBackend::Pinecone),
            "qdrant" => Ok(VectorBackend::Qdrant),
            "memory" => Ok(VectorBackend::Memory),
            other => Err(format!(
                "unknown vector backend '{}', expected pinecone, qdrant or memory",
                other
            )),
        }
    }
}

/// Vector store holding company embeddings keyed by string id.
///
/// Upserts replace any record with the same id.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    fn backend(&self) -> VectorBackend;

    /// Insert or replace records; returns how many were written
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<usize>;

    /// Nearest neighbours by cosine similarity, best first, at most `top_k`
    async fn query(&self, query: VectorQuery) -> VectorResult<Vec<VectorMatch>>;

    /// Prepare the index for vectors of `dimension` (create it if missing)
    async fn ensure_ready(&self, dimension: u32) -> VectorResult<()>;
}
