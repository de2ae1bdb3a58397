use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Builds the application router.
///
/// `/log` only accepts POST and reads bodies of any size; axum answers other
/// methods, CORS preflights included, with an empty 405. CORS applies to the
/// read-only `/leads` views alone. Unknown paths fall through to axum's
/// default 404.
pub fn router(state: Arc<AppState>) -> Router<()> {
    let ingest = Router::new()
        .route("/log", post(handlers::log_lead))
        .layer(DefaultBodyLimit::disable());

    let views = Router::new()
        .route("/leads", get(handlers::list_leads))
        .route("/leads/metrics", get(handlers::lead_metrics))
        .route("/leads/:chat_id", get(handlers::get_lead))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/health", get(handlers::health))
        .merge(ingest)
        .merge(views)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
