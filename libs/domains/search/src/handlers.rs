use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use axum_helpers::{
    AppError,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use utoipa::OpenApi;

use crate::error::SearchError;
use crate::models::{SearchFailure, SearchMatch, SearchRequest, SearchResponse, SearchResults};
use crate::service::SearchService;

pub const TAG: &str = "search";

#[derive(OpenApi)]
#[openapi(
    paths(search, search_alias, search_api),
    components(
        schemas(SearchRequest, SearchResponse, SearchResults, SearchFailure, SearchMatch),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Semantic company search")
    )
)]
pub struct ApiDoc;

/// Search routes, registered at absolute paths
pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/companies/search", post(search))
        .route("/search", post(search_alias))
        .route("/api/search", post(search_api))
        .with_state(service)
}

fn query_text(request: &SearchRequest) -> Result<&str, SearchError> {
    request
        .query
        .as_str()
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| SearchError::Validation("Query is required".to_string()))
}

async fn run_search(
    service: Arc<SearchService>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload?;
    let query = query_text(&request)?;

    Ok(Json(service.search(query, request.page, request.limit).await))
}

/// Semantic search over indexed companies.
///
/// The query is interpreted into text plus metadata filter, embedded once,
/// and matched against the index. Upstream failures are reported as
/// `{success: false, error}` with status 200.
#[utoipa::path(
    post,
    path = "/companies/search",
    tag = TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results or a failure report", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search(
    State(service): State<Arc<SearchService>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    run_search(service, payload).await
}

/// Alias of `POST /companies/search`
#[utoipa::path(
    post,
    path = "/search",
    tag = TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results or a failure report", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_alias(
    State(service): State<Arc<SearchService>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    run_search(service, payload).await
}

/// Alias of `POST /companies/search`
#[utoipa::path(
    post,
    path = "/api/search",
    tag = TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results or a failure report", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn search_api(
    State(service): State<Arc<SearchService>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    run_search(service, payload).await
}
