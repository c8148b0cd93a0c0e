use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::{debug, info};

use super::convert::{from_payload, point_id, to_filter, to_payload};
use super::QdrantConfig;
use crate::error::{VectorError, VectorResult};
use crate::index::{VectorBackend, VectorIndex};
use crate::models::{VectorMatch, VectorQuery, VectorRecord};

/// Qdrant collection used as the company index
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
}

impl QdrantIndex {
    pub fn new(config: QdrantConfig, collection: impl Into<String>) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self::from_client(client, collection))
    }

    pub fn from_client(client: Qdrant, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    fn backend(&self) -> VectorBackend {
        VectorBackend::Qdrant
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let count = records.len();
        let points = records
            .into_iter()
            .map(|record| {
                let payload = to_payload(&record.id, &record.metadata)?;
                Ok(PointStruct::new(point_id(&record.id), record.values, payload))
            })
            .collect::<VectorResult<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await?;

        debug!(collection = %self.collection, count, "Upserted points");
        Ok(count)
    }

    async fn query(&self, query: VectorQuery) -> VectorResult<Vec<VectorMatch>> {
        let mut builder =
            SearchPointsBuilder::new(&self.collection, query.vector, query.top_k as u64)
                .with_payload(true);

        if let Some(filter) = &query.filter {
            builder = builder.filter(to_filter(filter)?);
        }

        let response = self.client.search_points(builder).await?;

        response
            .result
            .into_iter()
            .map(|point| {
                let (id, metadata) = from_payload(point.id.as_ref(), point.payload)?;
                Ok(VectorMatch {
                    id,
                    score: point.score,
                    metadata: if query.include_metadata {
                        metadata
                    } else {
                        Default::default()
                    },
                })
            })
            .collect()
    }

    async fn ensure_ready(&self, dimension: u32) -> VectorResult<()> {
        if self.client.collection_exists(&self.collection).await? {
            debug!(collection = %self.collection, "Collection already exists");
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection).vectors_config(
                    VectorParamsBuilder::new(dimension as u64, Distance::Cosine),
                ),
            )
            .await?;

        info!(collection = %self.collection, dimension, "Created Qdrant collection");
        Ok(())
    }
}
