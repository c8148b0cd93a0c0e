use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CompanyError, CompanyResult};
use crate::models::{Company, CreateCompany, UpdateCompany};

/// Repository trait for Company persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a new company; ids are assigned by the store starting at 1
    async fn create(&self, input: CreateCompany) -> CompanyResult<Company>;

    async fn get_by_id(&self, id: i32) -> CompanyResult<Option<Company>>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> CompanyResult<Option<Company>>;

    /// All companies, ordered by id
    async fn list(&self) -> CompanyResult<Vec<Company>>;

    /// Merge fields into an existing company
    async fn update(&self, id: i32, input: UpdateCompany) -> CompanyResult<Company>;

    /// Persist the embedding computed for a company
    async fn set_embedding(&self, id: i32, embedding: Vec<f32>) -> CompanyResult<Company>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    companies: BTreeMap<i32, Company>,
}

/// In-memory implementation of CompanyRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCompanyRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, input: CreateCompany) -> CompanyResult<Company> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let company = Company::new(store.next_id, input);
        store.companies.insert(company.id, company.clone());

        tracing::info!(company_id = company.id, "Created company");
        Ok(company)
    }

    async fn get_by_id(&self, id: i32) -> CompanyResult<Option<Company>> {
        let store = self.store.read().await;
        Ok(store.companies.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CompanyResult<Option<Company>> {
        let store = self.store.read().await;
        Ok(store.companies.values().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> CompanyResult<Vec<Company>> {
        let store = self.store.read().await;
        Ok(store.companies.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: UpdateCompany) -> CompanyResult<Company> {
        let mut store = self.store.write().await;
        let company = store
            .companies
            .get_mut(&id)
            .ok_or(CompanyError::NotFound(id))?;

        company.apply_update(input);

        tracing::info!(company_id = id, "Updated company");
        Ok(company.clone())
    }

    async fn set_embedding(&self, id: i32, embedding: Vec<f32>) -> CompanyResult<Company> {
        let mut store = self.store.write().await;
        let company = store
            .companies
            .get_mut(&id)
            .ok_or(CompanyError::NotFound(id))?;

        company.embedding = Some(embedding);
        Ok(company.clone())
    }
}
