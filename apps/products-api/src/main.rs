//! Products API - REST server for the product catalogue

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use axum_helpers::{cors_layer_from_config, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::connect_from_config_with_retry;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        environment = ?config.environment,
        database = %config.database.redacted_url(),
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    info!("Successfully connected to PostgreSQL");

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let cors = cors_layer_from_config(&state.config.server, &state.config.environment)?;
    let router = create_router::<openapi::ApiDoc>(api::routes(&state), cors);
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!("Products API listening on {}", state.config.server.address());

    let db = state.db.clone();
    create_production_app(app, &state.config.server, async move {
        close_postgres(db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
