use axum::http::{HeaderValue, Method, header};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Creates a CORS layer restricted to `allowed_origins`.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - Max age: 1 hour
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from `ServerConfig::cors_allowed_origins`.
///
/// With no origins configured, development falls back to a permissive layer
/// and production refuses to start.
pub fn cors_layer_from_config(
    server_config: &ServerConfig,
    environment: &Environment,
) -> io::Result<CorsLayer> {
    if server_config.cors_allowed_origins.is_empty() {
        if environment.is_production() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS_ALLOWED_ORIGIN is required in production. Example: CORS_ALLOWED_ORIGIN=https://shop.example.com",
            ));
        }
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    }

    let origins = server_config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    info!(origins = ?server_config.cors_allowed_origins, "CORS configured");
    Ok(create_cors_layer(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            cors_allowed_origins: origins.iter().map(|s| s.to_string()).collect(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_unset_origins_permissive_in_development() {
        assert!(cors_layer_from_config(&config_with(&[]), &Environment::Development).is_ok());
    }

    #[test]
    fn test_unset_origins_rejected_in_production() {
        let err = cors_layer_from_config(&config_with(&[]), &Environment::Production).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_listed_origins_accepted() {
        let config = config_with(&["http://localhost:3000", "https://shop.example.com"]);
        assert!(cors_layer_from_config(&config, &Environment::Production).is_ok());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let config = config_with(&["http://bad\norigin"]);
        assert!(cors_layer_from_config(&config, &Environment::Development).is_err());
    }
}
