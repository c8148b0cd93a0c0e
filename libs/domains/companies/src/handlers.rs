use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{BadGatewayResponse, BadRequestValidationResponse, InternalServerErrorResponse},
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CompanyResult;
use crate::models::{Company, CompanyListResponse, CompanyResponse, CreateCompany};
use crate::repository::CompanyRepository;
use crate::service::CompanyService;

pub const TAG: &str = "companies";

/// OpenAPI documentation for the Companies API
#[derive(OpenApi)]
#[openapi(
    paths(list_companies, create_company),
    components(
        schemas(Company, CreateCompany, CompanyListResponse, CompanyResponse),
        responses(BadRequestValidationResponse, BadGatewayResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "YC company records")
    )
)]
pub struct ApiDoc;

/// Routes mounted under `/companies`
pub fn router<R: CompanyRepository + 'static>(service: Arc<CompanyService<R>>) -> Router {
    Router::new()
        .route("/", get(list_companies::<R>).post(create_company::<R>))
        .with_state(service)
}

/// List all companies
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All companies", body = CompanyListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_companies<R: CompanyRepository>(
    State(service): State<Arc<CompanyService<R>>>,
) -> CompanyResult<Json<CompanyListResponse>> {
    let data = service.list_companies().await?;
    Ok(Json(CompanyListResponse {
        success: true,
        data,
    }))
}

/// Create a company and index its embedding
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_company<R: CompanyRepository>(
    State(service): State<Arc<CompanyService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCompany>,
) -> CompanyResult<impl IntoResponse> {
    let name = input.name.clone();

    let company = match service.create_company(input).await {
        Ok(company) => company,
        Err(e) => {
            AuditEvent::new("company.create", None, AuditOutcome::Failure)
                .with_ip(extract_ip_from_headers(&headers))
                .with_details(json!({ "company_name": name, "error": e.to_string() }))
                .log();
            return Err(e);
        }
    };

    AuditEvent::new(
        "company.create",
        Some(format!("company:{}", company.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "company_name": company.name,
        "batch": company.batch,
    }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(CompanyResponse {
            success: true,
            data: company,
        }),
    ))
}
