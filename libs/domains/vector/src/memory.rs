//! Process-local index for tests and `VECTOR_BACKEND=memory`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{VectorError, VectorResult};
use crate::index::{VectorBackend, VectorIndex};
use crate::models::{VectorMatch, VectorQuery, VectorRecord};

#[derive(Clone, Default)]
pub struct InMemoryVectorIndex {
    records: Arc<RwLock<HashMap<String, VectorRecord>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Option<VectorRecord> {
        self.records.read().await.get(id).cloned()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn backend(&self) -> VectorBackend {
        VectorBackend::Memory
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<usize> {
        let count = records.len();
        let mut store = self.records.write().await;
        for record in records {
            store.insert(record.id.clone(), record);
        }
        Ok(count)
    }

    async fn query(&self, query: VectorQuery) -> VectorResult<Vec<VectorMatch>> {
        let store = self.records.read().await;

        let mut matches = Vec::new();
        for record in store.values() {
            if record.values.len() != query.vector.len() {
                return Err(VectorError::Validation(format!(
                    "Vector dimension {} does not match index dimension {}",
                    query.vector.len(),
                    record.values.len()
                )));
            }
            if let Some(filter) = &query.filter {
                if !filter.matches(&record.metadata) {
                    continue;
                }
            }
            matches.push(VectorMatch {
                id: record.id.clone(),
                score: cosine_similarity(&query.vector, &record.values),
                metadata: if query.include_metadata {
                    record.metadata.clone()
                } else {
                    Default::default()
                },
            });
        }

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(query.top_k as usize);

        Ok(matches)
    }

    async fn ensure_ready(&self, _dimension: u32) -> VectorResult<()> {
        Ok(())
    }
}
