use std::sync::Arc;

use axum::{Json, Router, extract::State, http::HeaderMap, routing::get};
use axum_helpers::{
    AuditEvent, AuditOutcome,
    errors::responses::{BadGatewayResponse, InternalServerErrorResponse},
    extract_ip_from_headers, extract_user_agent,
};
use domain_companies::CompanyRepository;
use serde_json::json;
use utoipa::OpenApi;

use crate::error::YcResult;
use crate::models::{ImportSummary, SyncSummary};
use crate::service::SyncService;

pub const TAG: &str = "yc";

#[derive(OpenApi)]
#[openapi(
    paths(sync_companies, import_companies),
    components(
        schemas(SyncSummary, ImportSummary),
        responses(BadGatewayResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "YC dataset ingestion")
    )
)]
pub struct ApiDoc;

/// Ingestion routes, registered at absolute paths
pub fn router<R: CompanyRepository + 'static>(service: Arc<SyncService<R>>) -> Router {
    Router::new()
        .route("/yc/sync", get(sync_companies::<R>))
        .route("/companies/import-yc", get(import_companies::<R>))
        .with_state(service)
}

fn audit<T, E: std::fmt::Display>(
    action: &str,
    headers: &HeaderMap,
    result: &Result<T, E>,
    count: Option<usize>,
) {
    let (outcome, details) = match result {
        Ok(_) => (AuditOutcome::Success, json!({ "count": count })),
        Err(e) => (AuditOutcome::Failure, json!({ "error": e.to_string() })),
    };

    AuditEvent::new(action, None, outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(details)
        .log();
}

/// Sync the YC dataset into the companies table and the vector index
#[utoipa::path(
    get,
    path = "/yc/sync",
    tag = TAG,
    responses(
        (status = 200, description = "Every record merged and indexed", body = SyncSummary),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sync_companies<R: CompanyRepository>(
    State(service): State<Arc<SyncService<R>>>,
    headers: HeaderMap,
) -> YcResult<Json<SyncSummary>> {
    let result = service.sync().await;
    let count = result.as_ref().ok().map(|s| s.count);
    audit("yc.sync", &headers, &result, count);
    result.map(Json)
}

/// Bulk-import the YC dataset into the vector index only
#[utoipa::path(
    get,
    path = "/companies/import-yc",
    tag = TAG,
    responses(
        (status = 200, description = "Every record embedded and indexed", body = ImportSummary),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn import_companies<R: CompanyRepository>(
    State(service): State<Arc<SyncService<R>>>,
    headers: HeaderMap,
) -> YcResult<Json<ImportSummary>> {
    let result = service.import().await;
    let count = result.as_ref().ok().map(|s| s.count);
    audit("yc.import", &headers, &result, count);
    result.map(Json)
}
