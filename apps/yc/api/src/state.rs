//! Shared application state.
//!
//! Built once in `main`; every field is an `Arc` or a pooled connection, so
//! cloning is cheap.

use std::sync::Arc;

use database::postgres::DatabaseConnection;
use domain_companies::{CompanyService, PgCompanyRepository};
use domain_search::SearchService;
use domain_vector::{EmbeddingProvider, VectorIndex};
use domain_yc::{CompanySource, HttpYcDirectory, SyncService};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub companies: Arc<CompanyService<PgCompanyRepository>>,
    pub search: Arc<SearchService>,
    pub yc: Arc<SyncService<PgCompanyRepository>>,
}

impl AppState {
    /// Wire the domain services over one pool, one embedder and one index
    pub fn new(
        config: Config,
        db: DatabaseConnection,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        let companies = Arc::new(CompanyService::new(
            PgCompanyRepository::new(db.clone()),
            index.clone(),
            embedder.clone(),
        ));

        let interpreter = config.search.interpreter.clone().build();
        let search = Arc::new(
            SearchService::new(interpreter, embedder.clone(), index.clone())
                .with_default_top_k(config.search.default_top_k),
        );

        let source: Arc<dyn CompanySource> = Arc::new(HttpYcDirectory::from_config(&config.yc));
        let yc = Arc::new(
            SyncService::new(source, companies.clone(), embedder, index)
                .with_chunk_size(config.yc.import_chunk_size),
        );

        Self {
            config,
            db,
            companies,
            search,
            yc,
        }
    }
}
