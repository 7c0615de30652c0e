use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, FieldErrors};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::MessageResponse;

/// Body text of every product 404
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Path segment that is not a product id, e.g. `/products/abc`
    #[error("Invalid product id: {0}")]
    InvalidId(String),

    /// Body that is not JSON, or sent without `Content-Type: application/json`
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        ProductError::Validation(errors.into())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::InvalidId(raw) => {
                AppError::NotFound(format!("Product '{}' not found", raw))
            }
            ProductError::MalformedBody(rejection) => AppError::JsonExtractorRejection(rejection),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            // Unknown and unparsable ids share the plain `{"message": ...}` body
            ProductError::NotFound(_) | ProductError::InvalidId(_) => {
                tracing::info!(error = %self, "Product lookup failed");
                (
                    StatusCode::NOT_FOUND,
                    Json(MessageResponse::new(NOT_FOUND_MESSAGE)),
                )
                    .into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
