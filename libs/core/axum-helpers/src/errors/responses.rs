//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, ValidationErrorResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - field validation failed",
    content_type = "application/json",
    example = json!({
        "message": "The name field is required. (and 1 more error)",
        "errors": {
            "name": ["The name field is required."],
            "price": ["The price field must be a number."]
        }
    })
)]
pub struct UnprocessableEntityResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not valid JSON",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "JSON_EXTRACTION",
        "message": "Failed to parse the request body as JSON: EOF while parsing an object at line 1 column 1"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);
