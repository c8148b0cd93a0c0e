//! YC Domain
//!
//! Ingestion of the public YC company dump. Two paths exist:
//!
//! - **sync** (`GET /yc/sync`): merge each record into the `companies`
//!   table by name, then embed `"{name}. {description}"` and index it under
//!   the row id.
//! - **import** (`GET /companies/import-yc`): embed each chunk of records
//!   concurrently and upsert it into the vector index under the upstream YC
//!   id, with the full metadata set. The table is not touched.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod source;

pub use config::YcConfig;
pub use error::{YcError, YcResult};
pub use handlers::ApiDoc;
pub use models::{ImportSummary, SyncSummary, YcCompany};
pub use service::SyncService;
pub use source::{CompanySource, HttpYcDirectory};

#[cfg(any(test, feature = "mocks"))]
pub use source::MockCompanySource;
