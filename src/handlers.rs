use crate::config::Config;
use crate::db_storage::LeadStorage;
use crate::decoder::decode_lead;
use crate::errors::AppError;
use crate::models::{Lead, LeadMetrics, LeadPage, LeadQuery};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead store backed by the SQLite pool.
    pub storage: LeadStorage,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-logger",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /log
///
/// Decodes a lead from the body and upserts it by chat id. Exactly one write
/// is attempted per request, even when every field decodes as empty.
///
/// Storage failures are logged. Unless `surface_write_errors` is set, the
/// client still receives `200 Logged`, so delivery is best-effort and
/// at-most-once from the sender's point of view.
pub async fn log_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), AppError> {
    let body = String::from_utf8_lossy(&body);
    let lead = decode_lead(&body);
    tracing::debug!("POST /log - chat_id: {:?}", lead.chat_id);

    if let Err(e) = state.storage.save_lead(&lead).await {
        tracing::error!("Error saving lead: {}", e);
        if state.config.surface_write_errors {
            return Err(e);
        }
    }

    Ok((StatusCode::OK, "Logged"))
}

/// GET /leads/:chat_id
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<Lead>, AppError> {
    tracing::info!("GET /leads/{}", chat_id);

    state
        .storage
        .get_lead(&chat_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Lead with chat id {} not found", chat_id)))
}

/// GET /leads
///
/// Paged listing with optional heat score, completeness, summary and
/// start date filters.
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LeadQuery>, QueryRejection>,
) -> Result<Json<LeadPage>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!("GET /leads - params: {:?}", query);

    let page = state.storage.list_leads(&query).await?;
    Ok(Json(page))
}

/// GET /leads/metrics
pub async fn lead_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeadMetrics>, AppError> {
    let metrics = state.storage.metrics().await?;
    Ok(Json(metrics))
}
