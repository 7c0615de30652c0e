//! JSON extractor that runs a typed conversion over the raw body.

use crate::errors::{AppError, FieldErrors};
use axum::extract::{FromRequest, Json, Request};
use serde_json::Value;

/// JSON extractor with field validation.
///
/// The body is first parsed as a [`serde_json::Value`], so malformed JSON and
/// a wrong `Content-Type` are rejected as [`AppError::JsonExtractorRejection`].
/// The value is then handed to `T::try_from`, and any [`FieldErrors`] become
/// a `422` with the per-field messages.
///
/// Going through `Value` lets validation report a wrong type or a missing
/// field as a field error instead of a deserialization failure.
///
/// # Example
/// ```ignore
/// use axum_helpers::{FieldErrors, ValidatedJson};
///
/// struct NewTag { label: String }
///
/// impl TryFrom<serde_json::Value> for NewTag {
///     type Error = FieldErrors;
///     fn try_from(value: serde_json::Value) -> Result<Self, FieldErrors> {
///         match value.get("label").and_then(|v| v.as_str()) {
///             Some(label) => Ok(NewTag { label: label.to_string() }),
///             None => {
///                 let mut errors = FieldErrors::new();
///                 errors.add("label", "The label field is required.");
///                 Err(errors)
///             }
///         }
///     }
/// }
///
/// async fn create_tag(ValidatedJson(tag): ValidatedJson<NewTag>) -> String {
///     tag.label
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: TryFrom<Value, Error = FieldErrors>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state).await?;
        let data = T::try_from(raw)?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use tower::ServiceExt;

    struct Label(String);

    impl TryFrom<Value> for Label {
        type Error = FieldErrors;

        fn try_from(value: Value) -> Result<Self, FieldErrors> {
            match value.get("label").and_then(Value::as_str) {
                Some(label) => Ok(Label(label.to_string())),
                None => {
                    let mut errors = FieldErrors::new();
                    errors.add("label", "The label field is required.");
                    Err(errors)
                }
            }
        }
    }

    async fn echo(ValidatedJson(Label(label)): ValidatedJson<Label>) -> String {
        label
    }

    fn app() -> Router {
        Router::new().route("/labels", post(echo))
    }

    fn json_request(body: &'static str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/labels")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let response = app()
            .oneshot(json_request(r#"{"label":"sale"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_field_errors_become_422() {
        let response = app().oneshot(json_request(r#"{}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_before_validation() {
        let response = app().oneshot(json_request(r#"{"label":"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/labels")
            .body(Body::from(r#"{"label":"sale"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
