use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_vector::VectorError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Company not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CompanyResult<T> = Result<T, CompanyError>;

impl From<serde_json::Error> for CompanyError {
    fn from(err: serde_json::Error) -> Self {
        CompanyError::Internal(format!("Failed to encode embedding: {}", err))
    }
}

/// Convert CompanyError to AppError for standardized error responses
impl From<CompanyError> for AppError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::NotFound(id) => AppError::NotFound(format!("Company {} not found", id)),
            CompanyError::Validation(msg) => AppError::BadRequest(msg),
            CompanyError::Database(e) => AppError::Database(e),
            CompanyError::Vector(e) => e.into(),
            CompanyError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CompanyError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
