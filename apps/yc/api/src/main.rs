use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_vector::{EmbeddingProvider, OpenAIProvider};
use migration::Migrator;
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

    let db = connect_from_config_with_retry(
        config.database.clone(),
        Some(RetryConfig::for_startup()),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::new(OpenAIProvider::new(config.openai.clone()));
    let dimension = embedder.model().dimension();

    let backend = config.vector.backend.backend();
    let index = config.vector.clone().build()?;
    index.ensure_ready(dimension).await?;
    info!(
        backend = backend.as_str(),
        index = %config.vector.index_name,
        dimension,
        "Vector index ready"
    );

    let state = AppState::new(config, db, embedder, index);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state)).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting YC companies API with graceful shutdown (30s timeout)");

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            close_postgres(db, "yc").await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("YC companies API shutdown complete");
    Ok(())
}
