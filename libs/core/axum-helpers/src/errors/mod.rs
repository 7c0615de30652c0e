pub mod codes;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use validation::{FieldErrors, ValidationErrorResponse};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error except field validation failures, which use
/// [`ValidationErrorResponse`].
///
/// - `code`: integer error code for logging/monitoring (e.g., 2003)
/// - `error`: machine-readable identifier (e.g., "DATABASE_ERROR")
/// - `message`: human-readable message
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "The requested resource was not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    #[schema(example = 2003)]
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    #[schema(example = "DATABASE_ERROR")]
    pub error: String,
    /// Human-readable error message
    #[schema(example = "Database error occurred")]
    pub message: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// Every variant maps to a status code, an [`ErrorCode`] and a log level.
/// Driver and parser details are logged, never sent to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

impl AppError {
    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message) = match self {
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "Validation failed"
                );
                let body = Json(ValidationErrorResponse::from(errors));
                return (status, body).into_response();
            }
            AppError::Database(e) => (map_db_error(&e), None),
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (ErrorCode::JsonExtraction, Some(e.body_text()))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (ErrorCode::NotFound, Some(msg))
            }
        };

        let message = message.unwrap_or_else(|| code.default_message().to_string());
        error_response(status, message, code)
    }
}

/// Log a SeaORM error and pick the [`ErrorCode`] that describes it.
fn map_db_error(error: &DbErr) -> ErrorCode {
    let code = match error {
        DbErr::ConnectionAcquire(_) => ErrorCode::DatabasePoolTimeout,
        DbErr::Conn(_) => ErrorCode::DatabaseConnection,
        DbErr::Exec(_) | DbErr::Query(_) => ErrorCode::DatabaseError,
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => ErrorCode::DatabaseNotFound,
        DbErr::Type(_) | DbErr::Json(_) => ErrorCode::DatabaseDecode,
        _ => ErrorCode::DatabaseUnhandled,
    };

    tracing::error!(error_code = code.code(), "Database error: {:?}", error);
    code
}

/// Build an [`ErrorResponse`] with the given status.
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::NOT_FOUND,
///     "No such route".to_string(),
///     ErrorCode::NotFound,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
    });

    (status, body).into_response()
}
