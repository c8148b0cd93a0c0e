use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_companies::CompanyError;
use domain_vector::VectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YcError {
    #[error("Failed to fetch YC dataset: {0}")]
    Fetch(String),

    #[error(transparent)]
    Company(#[from] CompanyError),

    #[error(transparent)]
    Vector(#[from] VectorError),
}

pub type YcResult<T> = Result<T, YcError>;

impl From<YcError> for AppError {
    fn from(err: YcError) -> Self {
        match err {
            err @ YcError::Fetch(_) => AppError::BadGateway(err.to_string()),
            YcError::Company(e) => e.into(),
            YcError::Vector(e) => e.into(),
        }
    }
}

impl IntoResponse for YcError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
