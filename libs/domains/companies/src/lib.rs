//! Companies Domain
//!
//! The `companies` table and the vector-index write that accompanies every
//! insert.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET/POST /companies
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────────────────────────┐
//! │   Service   │ ──▶ │ EmbeddingProvider + VectorIndex  │
//! └──────┬──────┘     └──────────────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or Postgres (sea-orm)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_companies::{handlers, CompanyService, InMemoryCompanyRepository};
//! use domain_vector::{InMemoryVectorIndex, OpenAIConfig, OpenAIProvider};
//!
//! let embedder = Arc::new(OpenAIProvider::new(OpenAIConfig::new("sk-...".to_string())));
//! let service = CompanyService::new(
//!     InMemoryCompanyRepository::new(),
//!     Arc::new(InMemoryVectorIndex::new()),
//!     embedder,
//! );
//! let router = handlers::router(Arc::new(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CompanyError, CompanyResult};
pub use handlers::ApiDoc;
pub use models::{
    Company, CompanyListResponse, CompanyResponse, CreateCompany, UpdateCompany,
};
pub use postgres::PgCompanyRepository;
pub use repository::{CompanyRepository, InMemoryCompanyRepository};
pub use service::CompanyService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockCompanyRepository;
