use std::sync::Arc;

use domain_companies::{CompanyRepository, CompanyService};
use domain_vector::{EmbeddingProvider, VectorIndex, VectorRecord};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_IMPORT_CHUNK_SIZE;
use crate::error::YcResult;
use crate::models::{ImportSummary, SyncSummary, YcCompany};
use crate::source::CompanySource;

/// Pulls the YC dataset into the companies table and the vector index.
///
/// `sync` goes through the relational table one record at a time and keys
/// vectors by row id. `import` skips the table, embeds each chunk
/// concurrently and keys vectors by the upstream YC id.
pub struct SyncService<R: CompanyRepository> {
    source: Arc<dyn CompanySource>,
    companies: Arc<CompanyService<R>>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    chunk_size: usize,
}

impl<R: CompanyRepository> SyncService<R> {
    pub fn new(
        source: Arc<dyn CompanySource>,
        companies: Arc<CompanyService<R>>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            source,
            companies,
            embedder,
            index,
            chunk_size: DEFAULT_IMPORT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Merge every upstream record into the table by name, then embed and
    /// index it. Stops at the first failure; earlier records stay written.
    pub async fn sync(&self) -> YcResult<SyncSummary> {
        let records = self.source.fetch_all().await?;
        info!(total = records.len(), "Starting YC sync");

        let mut count = 0;
        for record in &records {
            if !record.has_name() {
                warn!(yc_id = %record.id, "Skipping YC record without a name");
                continue;
            }

            let company = self
                .companies
                .upsert_by_name(record.to_create_company())
                .await?;
            self.companies
                .embed_and_index(company, &record.sync_embedding_text())
                .await?;
            count += 1;
        }

        info!(count, "YC sync completed");
        Ok(SyncSummary {
            message: "Sync completed".to_string(),
            count,
        })
    }

    /// Embed and upsert every upstream record straight into the index
    pub async fn import(&self) -> YcResult<ImportSummary> {
        let records = self.source.fetch_all().await?;
        info!(
            total = records.len(),
            chunk_size = self.chunk_size,
            "Starting YC bulk import"
        );

        let mut count = 0;
        for (chunk_no, chunk) in records.chunks(self.chunk_size).enumerate() {
            count += self.import_chunk(chunk).await?;
            debug!(chunk = chunk_no, imported = count, "Imported chunk");
        }

        info!(count, "YC bulk import completed");
        Ok(ImportSummary {
            success: true,
            count,
        })
    }

    async fn import_chunk(&self, chunk: &[YcCompany]) -> YcResult<usize> {
        let texts: Vec<String> = chunk.iter().map(YcCompany::import_embedding_text).collect();
        let embeddings = try_join_all(texts.iter().map(|text| self.embedder.embed(text))).await?;

        let records: Vec<VectorRecord> = chunk
            .iter()
            .zip(embeddings)
            .map(|(company, embedding)| {
                VectorRecord::new(
                    company.id.clone(),
                    embedding.values,
                    company.import_metadata(),
                )
            })
            .collect();

        let written = records.len();
        self.index.upsert(records).await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YcError;
    use crate::source::MockCompanySource;
    use domain_companies::InMemoryCompanyRepository;
    use domain_vector::{
        EmbeddingResult, InMemoryVectorIndex, MockEmbeddingProvider, MockVectorIndex, VectorError,
    };

    fn record(id: &str, name: &str) -> YcCompany {
        YcCompany {
            id: id.into(),
            name: name.into(),
            batch: Some("W21".into()),
            long_description: Some(format!("{} description", name)),
            ..Default::default()
        }
    }

    fn source_with(records: Vec<YcCompany>) -> Arc<MockCompanySource> {
        let mut source = MockCompanySource::new();
        source
            .expect_fetch_all()
            .returning(move || Ok(records.clone()));
        Arc::new(source)
    }

    fn embedder() -> Arc<MockEmbeddingProvider> {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|text| Ok(EmbeddingResult::new(vec![text.len() as f32, 1.0])));
        Arc::new(embedder)
    }

    fn service(
        source: Arc<MockCompanySource>,
        repo: InMemoryCompanyRepository,
        index: Arc<dyn VectorIndex>,
    ) -> SyncService<InMemoryCompanyRepository> {
        let embedder = embedder();
        let companies = Arc::new(CompanyService::new(repo, index.clone(), embedder.clone()));
        SyncService::new(source, companies, embedder, index)
    }

    #[tokio::test]
    async fn test_sync_writes_rows_and_vectors_by_row_id() {
        let repo = InMemoryCompanyRepository::new();
        let index = Arc::new(InMemoryVectorIndex::new());
        let service = service(
            source_with(vec![record("901", "Acme")]),
            repo.clone(),
            index.clone(),
        );

        let summary = service.sync().await.unwrap();
        assert_eq!(summary.message, "Sync completed");
        assert_eq!(summary.count, 1);

        let row = repo.find_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.description.as_deref(), Some("Acme description"));
        assert!(row.embedding.is_some());

        let vector = index.get("1").await.unwrap();
        assert_eq!(vector.metadata.name.as_deref(), Some("Acme"));
        assert!(index.get("901").await.is_none());
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let repo = InMemoryCompanyRepository::new();
        let index = Arc::new(InMemoryVectorIndex::new());
        let service = service(
            source_with(vec![record("1", "Acme"), record("2", "Globex")]),
            repo.clone(),
            index.clone(),
        );

        service.sync().await.unwrap();
        service.sync().await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(index.len().await, 2);
    }

    #[tokio::test]
    async fn test_sync_skips_nameless_records() {
        let repo = InMemoryCompanyRepository::new();
        let service = service(
            source_with(vec![record("1", "  "), record("2", "Acme")]),
            repo.clone(),
            Arc::new(InMemoryVectorIndex::new()),
        );

        let summary = service.sync().await.unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_skips_null_named_record_from_dataset() {
        let records: Vec<YcCompany> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Acme", "long_description": "Robots"},
            {"id": 2, "name": null}
        ]))
        .unwrap();

        let repo = InMemoryCompanyRepository::new();
        let index = Arc::new(InMemoryVectorIndex::new());
        let service = service(source_with(records), repo.clone(), index.clone());

        let summary = service.sync().await.unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(index.len().await, 1);
    }

    #[tokio::test]
    async fn test_sync_stops_at_first_index_failure() {
        let mut index = MockVectorIndex::new();
        index
            .expect_upsert()
            .times(1)
            .returning(|_| Err(VectorError::Pinecone("unavailable".into())));

        let repo = InMemoryCompanyRepository::new();
        let service = service(
            source_with(vec![record("1", "Acme"), record("2", "Globex")]),
            repo.clone(),
            Arc::new(index),
        );

        let err = service.sync().await.unwrap_err();
        assert!(matches!(err, YcError::Company(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_fetch_failure() {
        let mut source = MockCompanySource::new();
        source
            .expect_fetch_all()
            .returning(|| Err(YcError::Fetch("timeout".into())));

        let repo = InMemoryCompanyRepository::new();
        let service = service(
            Arc::new(source),
            repo.clone(),
            Arc::new(InMemoryVectorIndex::new()),
        );

        assert!(matches!(service.sync().await, Err(YcError::Fetch(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_uses_upstream_ids_and_defaults() {
        let index = Arc::new(InMemoryVectorIndex::new());
        let repo = InMemoryCompanyRepository::new();
        let service = service(
            source_with(vec![record("901", "Acme")]),
            repo.clone(),
            index.clone(),
        );

        let summary = service.import().await.unwrap();
        assert!(summary.success);
        assert_eq!(summary.count, 1);

        let vector = index.get("901").await.unwrap();
        assert_eq!(vector.metadata.industry.as_deref(), Some(""));
        assert_eq!(vector.metadata.team_size, Some(0));
        assert_eq!(vector.metadata.is_hiring, Some(false));
        assert_eq!(vector.metadata.tags, Some(vec![]));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_upserts_once_per_chunk() {
        let mut index = MockVectorIndex::new();
        index
            .expect_upsert()
            .times(3)
            .returning(|records| Ok(records.len()));

        let records = (1..=5)
            .map(|i| record(&i.to_string(), &format!("Company {}", i)))
            .collect();
        let service = service(
            source_with(records),
            InMemoryCompanyRepository::new(),
            Arc::new(index),
        )
        .with_chunk_size(2);

        let summary = service.import().await.unwrap();
        assert_eq!(summary.count, 5);
    }

    #[tokio::test]
    async fn test_import_embedding_failure_aborts_chunk() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|_| Err(VectorError::Embedding("rate limited".into())));
        let mut index = MockVectorIndex::new();
        index.expect_upsert().never();

        let index: Arc<dyn VectorIndex> = Arc::new(index);
        let embedder = Arc::new(embedder);
        let companies = Arc::new(CompanyService::new(
            InMemoryCompanyRepository::new(),
            index.clone(),
            embedder.clone(),
        ));
        let service = SyncService::new(
            source_with(vec![record("1", "Acme")]),
            companies,
            embedder,
            index,
        );

        assert!(matches!(service.import().await, Err(YcError::Vector(_))));
    }

    #[tokio::test]
    async fn test_import_empty_dataset() {
        let service = service(
            source_with(vec![]),
            InMemoryCompanyRepository::new(),
            Arc::new(InMemoryVectorIndex::new()),
        );
        let summary = service.import().await.unwrap();
        assert_eq!(summary.count, 0);
    }
}
