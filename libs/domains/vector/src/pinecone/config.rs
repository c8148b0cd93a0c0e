use core_config::{ConfigError, FromEnv, env_optional, env_parse, env_required};

pub const DEFAULT_UPSERT_BATCH_SIZE: usize = 100;

/// Pinecone data-plane configuration.
///
/// `index_host` is the per-index host shown in the Pinecone console,
/// e.g. `yc-companies-abc123.svc.us-east-1.pinecone.io`.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_host: String,
    pub namespace: Option<String>,
    pub batch_size: usize,
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>, index_host: &str) -> Self {
        Self {
            api_key: api_key.into(),
            index_host: normalize_host(index_host),
            namespace: None,
            batch_size: DEFAULT_UPSERT_BATCH_SIZE,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

impl FromEnv for PineconeConfig {
    /// - PINECONE_API_KEY: required
    /// - PINECONE_INDEX_HOST: required
    /// - PINECONE_NAMESPACE: optional, default namespace when unset
    /// - PINECONE_UPSERT_BATCH_SIZE: defaults to 100
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("PINECONE_API_KEY")?;
        let index_host = env_required("PINECONE_INDEX_HOST")?;
        let batch_size: usize = env_parse(
            "PINECONE_UPSERT_BATCH_SIZE",
            &DEFAULT_UPSERT_BATCH_SIZE.to_string(),
        )?;

        let mut config = Self::new(api_key, &index_host).with_batch_size(batch_size);
        config.namespace = env_optional("PINECONE_NAMESPACE");
        Ok(config)
    }
}
