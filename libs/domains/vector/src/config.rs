use std::sync::Arc;

use core_config::{ConfigError, FromEnv, env_or_default};

use crate::error::VectorResult;
use crate::index::{VectorBackend, VectorIndex};
use crate::memory::InMemoryVectorIndex;
use crate::pinecone::{PineconeConfig, PineconeIndex};
use crate::qdrant::{QdrantConfig, QdrantIndex};

pub const DEFAULT_INDEX_NAME: &str = "yc-companies";

/// Backend-specific connection settings
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Pinecone(PineconeConfig),
    Qdrant(QdrantConfig),
    Memory,
}

impl BackendConfig {
    pub fn backend(&self) -> VectorBackend {
        match self {
            BackendConfig::Pinecone(_) => VectorBackend::Pinecone,
            BackendConfig::Qdrant(_) => VectorBackend::Qdrant,
            BackendConfig::Memory => VectorBackend::Memory,
        }
    }
}

/// Selects and configures the vector store
#[derive(Debug, Clone)]
pub struct VectorIndexConfig {
    /// Qdrant collection name; informational for Pinecone, whose host names the index
    pub index_name: String,
    pub backend: BackendConfig,
}

impl VectorIndexConfig {
    pub fn memory() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            backend: BackendConfig::Memory,
        }
    }

    pub fn build(self) -> VectorResult<Arc<dyn VectorIndex>> {
        let index: Arc<dyn VectorIndex> = match self.backend {
            BackendConfig::Pinecone(config) => Arc::new(PineconeIndex::new(config)),
            BackendConfig::Qdrant(config) => Arc::new(QdrantIndex::new(config, self.index_name)?),
            BackendConfig::Memory => Arc::new(InMemoryVectorIndex::new()),
        };
        Ok(index)
    }
}

impl FromEnv for VectorIndexConfig {
    /// - VECTOR_BACKEND: pinecone (default), qdrant or memory
    /// - VECTOR_INDEX_NAME: defaults to yc-companies
    ///
    /// Backend variables are only read for the selected backend.
    fn from_env() -> Result<Self, ConfigError> {
        let backend: VectorBackend = env_or_default("VECTOR_BACKEND", "pinecone")
            .parse()
            .map_err(|details| ConfigError::InvalidValue {
                key: "VECTOR_BACKEND".to_string(),
                details,
            })?;

        let backend = match backend {
            VectorBackend::Pinecone => BackendConfig::Pinecone(PineconeConfig::from_env()?),
            VectorBackend::Qdrant => BackendConfig::Qdrant(QdrantConfig::from_env()?),
            VectorBackend::Memory => BackendConfig::Memory,
        };

        Ok(Self {
            index_name: env_or_default("VECTOR_INDEX_NAME", DEFAULT_INDEX_NAME),
            backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_pinecone() {
        temp_env::with_vars(
            [
                ("VECTOR_BACKEND", None::<&str>),
                ("VECTOR_INDEX_NAME", None),
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_HOST", Some("yc.svc.pinecone.io")),
            ],
            || {
                let config = VectorIndexConfig::from_env().unwrap();
                assert_eq!(config.backend.backend(), VectorBackend::Pinecone);
                assert_eq!(config.index_name, DEFAULT_INDEX_NAME);
            },
        );
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        temp_env::with_vars(
            [
                ("VECTOR_BACKEND", Some("Memory")),
                ("PINECONE_API_KEY", None::<&str>),
            ],
            || {
                let config = VectorIndexConfig::from_env().unwrap();
                assert_eq!(config.backend.backend(), VectorBackend::Memory);
            },
        );
    }

    #[test]
    fn test_qdrant_backend_uses_index_name() {
        temp_env::with_vars(
            [
                ("VECTOR_BACKEND", Some("qdrant")),
                ("VECTOR_INDEX_NAME", Some("startups")),
            ],
            || {
                let config = VectorIndexConfig::from_env().unwrap();
                assert_eq!(config.backend.backend(), VectorBackend::Qdrant);
                assert_eq!(config.index_name, "startups");
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_var("VECTOR_BACKEND", Some("faiss"), || {
            let err = VectorIndexConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("VECTOR_BACKEND"));
        });
    }

    #[tokio::test]
    async fn test_build_memory_index() {
        let index = VectorIndexConfig::memory().build().unwrap();
        assert_eq!(index.backend(), VectorBackend::Memory);
    }
}
