use std::sync::Arc;

use domain_vector::{EmbeddingProvider, VectorIndex, VectorRecord};
use validator::Validate;

use crate::error::{CompanyError, CompanyResult};
use crate::models::{Company, CreateCompany};
use crate::repository::CompanyRepository;

/// Company persistence plus the vector index write that follows every save.
///
/// The table and the index are written one after the other with no
/// transaction spanning both. A failed index write leaves the row in place;
/// re-running the same operation converges because rows merge by name and
/// vector upserts are keyed by row id.
pub struct CompanyService<R: CompanyRepository> {
    repository: Arc<R>,
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(
        repository: R,
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            index,
            embedder,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn list_companies(&self) -> CompanyResult<Vec<Company>> {
        self.repository.list().await
    }

    /// Insert a company, embed it and index it under its row id
    pub async fn create_company(&self, input: CreateCompany) -> CompanyResult<Company> {
        input
            .validate()
            .map_err(|e| CompanyError::Validation(e.to_string()))?;

        let company = self.repository.create(input).await?;
        let text = company.embedding_text();
        self.embed_and_index(company, &text).await
    }

    /// Create the company, or merge into the existing row with the same name
    pub async fn upsert_by_name(&self, input: CreateCompany) -> CompanyResult<Company> {
        match self.repository.find_by_name(&input.name).await? {
            Some(existing) => self.repository.update(existing.id, input.into()).await,
            None => self.repository.create(input).await,
        }
    }

    /// Embed `text`, store the embedding on the row and upsert the vector
    pub async fn embed_and_index(&self, company: Company, text: &str) -> CompanyResult<Company> {
        let embedding = self.embedder.embed(text).await?;

        let company = self
            .repository
            .set_embedding(company.id, embedding.values.clone())
            .await?;

        let record = VectorRecord::new(
            company.id.to_string(),
            embedding.values,
            company.vector_metadata(),
        );

        if let Err(e) = self.index.upsert(vec![record]).await {
            tracing::error!(
                company_id = company.id,
                error = %e,
                "Company saved but vector upsert failed"
            );
            return Err(e.into());
        }

        tracing::debug!(company_id = company.id, "Indexed company");
        Ok(company)
    }
}
