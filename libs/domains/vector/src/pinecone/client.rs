use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use super::PineconeConfig;
use crate::error::{VectorError, VectorResult};
use crate::index::{VectorBackend, VectorIndex};
use crate::models::{MetadataFilter, VectorMatch, VectorMetadata, VectorQuery, VectorRecord};

/// Pinecone index over its REST data plane
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
}

#[derive(Debug, Serialize)]
struct PineconeVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a VectorMetadata,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<PineconeVector<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: u32,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a MetadataFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

impl PineconeIndex {
    pub fn new(config: PineconeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> VectorResult<R> {
        let response = self
            .client
            .post(format!("{}{}", self.config.index_host, path))
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| VectorError::Pinecone(format!("Pinecone request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorError::Pinecone(format!(
                "Pinecone API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VectorError::Pinecone(format!("Invalid Pinecone response: {}", e)))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn backend(&self) -> VectorBackend {
        VectorBackend::Pinecone
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<usize> {
        let mut written = 0;

        for chunk in records.chunks(self.config.batch_size.max(1)) {
            let request = UpsertRequest {
                vectors: chunk
                    .iter()
                    .map(|r| PineconeVector {
                        id: &r.id,
                        values: &r.values,
                        metadata: &r.metadata,
                    })
                    .collect(),
                namespace: self.config.namespace.as_deref(),
            };

            let response: UpsertResponse = self.post("/vectors/upsert", &request).await?;
            written += response.upserted_count.unwrap_or(chunk.len());
        }

        debug!(count = written, "Upserted vectors to Pinecone");
        Ok(written)
    }

    async fn query(&self, query: VectorQuery) -> VectorResult<Vec<VectorMatch>> {
        let request = QueryRequest {
            vector: &query.vector,
            top_k: query.top_k,
            include_metadata: query.include_metadata,
            include_values: false,
            filter: query.filter.as_ref(),
            namespace: self.config.namespace.as_deref(),
        };

        let response: QueryResponse = self.post("/query", &request).await?;
        Ok(response.matches)
    }

    async fn ensure_ready(&self, dimension: u32) -> VectorResult<()> {
        // Pinecone indexes are provisioned out of band
        info!(host = %self.config.index_host, dimension, "Using existing Pinecone index");
        Ok(())
    }
}
