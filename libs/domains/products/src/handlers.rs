use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestJsonResponse, InternalServerErrorResponse, UnprocessableEntityResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::{MessageResponse, Product, ProductEnvelope, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductInput, ProductEnvelope, MessageResponse),
        responses(
            UnprocessableEntityResponse,
            BadRequestJsonResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Product id taken from the `{id}` path segment.
///
/// Anything that is not a base-10 `i64` cannot name a product, so it is
/// rejected with the same 404 as an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct ProductIdPath(pub i64);

impl<S> FromRequestParts<S> for ProductIdPath
where
    S: Send + Sync,
{
    type Rejection = ProductError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ProductError::InvalidId(rejection.body_text()))?;

        raw.parse::<i64>()
            .map(ProductIdPath)
            .map_err(|_| ProductError::InvalidId(raw))
    }
}

/// List every product
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All products, ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductEnvelope),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductEnvelope::created(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = MessageResponse,
            example = json!({"message": "Product not found"})),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ProductIdPath(id): ProductIdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's name, description, price and stock.
///
/// The product must exist before the body is looked at: an unknown id is a
/// 404 even when the body is invalid.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductEnvelope),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, description = "Product not found", body = MessageResponse,
            example = json!({"message": "Product not found"})),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ProductIdPath(id): ProductIdPath,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductResult<Json<ProductEnvelope>> {
    service.get_product(id).await?;

    let Json(payload) = payload?;
    let input = ProductInput::try_from(payload)?;

    let product = service.update_product(id, input).await?;
    Ok(Json(ProductEnvelope::updated(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse,
            example = json!({"message": "Product deleted"})),
        (status = 404, description = "Product not found", body = MessageResponse,
            example = json!({"message": "Product not found"})),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ProductIdPath(id): ProductIdPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
