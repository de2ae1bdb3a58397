use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_logger::config::Config;
use lead_logger::db::Database;
use lead_logger::db_storage::LeadStorage;
use lead_logger::handlers::AppState;
use lead_logger::routes;

/// Main entry point for the lead logger.
///
/// Sets up tracing, loads configuration, prepares the SQLite store, and
/// serves the router. A store that fails to initialize is logged and the
/// server starts anyway.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_logger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = Database::new(&config);
    db.initialize().await;

    let app_state = Arc::new(AppState {
        storage: LeadStorage::new(db.pool.clone()),
        config: config.clone(),
    });

    let app = routes::router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Lead logger listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
