//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{create_permissive_cors_layer, create_router};
    use chrono::{TimeZone, Utc};
    use core_config::{app_info, server::ServerConfig, Environment};
    use database::postgres::PostgresConfig;
    use domain_products::entity;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(db: DatabaseConnection) -> Router {
        let state = AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgres://localhost/test"),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db,
        };
        create_router::<ApiDoc>(routes(&state), create_permissive_cors_layer())
    }

    fn laptop() -> entity::Model {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap().into();
        entity::Model {
            id: 1,
            name: "Laptop".to_string(),
            description: "Ordinateur performant".to_string(),
            price: 899.99,
            stock: 10,
            created_at: at,
            updated_at: at,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_list_is_mounted_under_api_products() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![laptop()]])
            .into_connection();

        let (status, body) = get(app(db), "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["name"], "Laptop");
    }

    #[tokio::test]
    async fn test_unknown_product_under_api_products_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let (status, body) = get(app(db), "/api/products/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Product not found"}));
    }

    #[tokio::test]
    async fn test_trailing_slash_is_not_routed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, _) = get(app(db), "/api/products/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
