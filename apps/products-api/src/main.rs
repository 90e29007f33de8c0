//! Products API - REST server over the product catalog

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use tracing::{info, warn};

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

    info!("Connecting to database");
    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        config.retry.clone(),
    )
    .await?;
    info!("Database connection established");

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState { db };

    // Build REST router
    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes)?
        .merge(health_router(config.app.clone()))
        .merge(api::health::router(state.clone()));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db;
    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing database pool");
        if let Err(e) = database::postgres::close(db).await {
            warn!(error = %e, "Failed to close database pool cleanly");
        }
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
