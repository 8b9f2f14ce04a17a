use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
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

    // Connect to Redis with retry
    let redis = database::redis::connect_from_config_with_retry(&config.redis, None).await?;

    let state = AppState { config, redis };

    if let Some(schema) = state.config.index {
        api::items::ensure_index(&state, &schema).await?;
    }

    let api_routes = api::routes(&state);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    let app = router.merge(health_router(state.config.app));

    info!("Starting Art Deco API with production-ready shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing Redis connection");
            drop(state.redis);
            info!("Redis connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Art Deco API shutdown complete");
    Ok(())
}
