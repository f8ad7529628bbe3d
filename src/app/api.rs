use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::db::{cache_key, Database};
use crate::entity::{enricher, resolver, AggregatePayload};
use crate::llm::TextGenerator;
use crate::TARGET_WEB_REQUEST;

/// Shared per-process state handed to every request handler. Built once at
/// startup and passed in explicitly, so tests can substitute an in-memory
/// database and a scripted generator.
pub struct AppState<G> {
    pub db: Database,
    pub generator: Arc<G>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            db: self.db.clone(),
            generator: Arc::clone(&self.generator),
        }
    }
}

/// Query parameters for the events endpoint. Both are required; they are
/// optional here so the handler can answer the 400 itself.
#[derive(Deserialize)]
pub struct EventsQuery {
    year: Option<String>,
    continent: Option<String>,
}

/// Errors surfaced to HTTP callers as plain-text responses. Details stay in
/// the logs.
pub enum ApiError {
    BadRequest(&'static str),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process historical events request",
            )
                .into_response(),
        }
    }
}

pub fn build_router<G>(state: AppState<G>) -> Router
where
    G: TextGenerator + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(status_check))
        .route("/events", get(historic_events::<G>))
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and runs the API server until shutdown.
pub async fn serve<G>(state: AppState<G>, addr: &str) -> Result<()>
where
    G: TextGenerator + 'static,
{
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}

/// Liveness endpoint.
async fn status_check() -> &'static str {
    "OK"
}

/// The one real endpoint: check the cache, otherwise resolve the entity list
/// for the (year, continent) pair, enrich each entity in resolver order, cache
/// the assembled payload, and reply with it.
async fn historic_events<G>(
    State(state): State<AppState<G>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<AggregatePayload>, ApiError>
where
    G: TextGenerator + 'static,
{
    let (year, continent) = match (query.year.as_deref(), query.continent.as_deref()) {
        (Some(year), Some(continent)) if !year.is_empty() && !continent.is_empty() => {
            (year, continent)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required query parameters 'year' and 'continent'",
            ))
        }
    };

    let key = cache_key(year, continent);

    // A failed cache read is a miss, never a request failure.
    match state.db.get_cached_payload(&key).await {
        Ok(Some(payload)) => {
            info!(target: TARGET_WEB_REQUEST, "Cache HIT for: {}", key);
            return Ok(Json(payload));
        }
        Ok(None) => {}
        Err(e) => {
            warn!(target: TARGET_WEB_REQUEST, "Cache lookup failed for {}: {}; treating as miss", key, e);
        }
    }

    info!(target: TARGET_WEB_REQUEST, "Cache MISS for: {}. Fetching from model.", key);

    let entity_names = resolver::resolve_entities(state.generator.as_ref(), year, continent)
        .await
        .map_err(|e| {
            error!(target: TARGET_WEB_REQUEST, "Entity resolution failed for {}: {:#}", key, e);
            ApiError::Internal
        })?;

    // Zero entities is a valid answer; cache it so identical queries
    // short-circuit without another model call.
    if entity_names.is_empty() {
        let payload = AggregatePayload::new();
        if let Err(e) = state.db.store_payload(&key, &payload).await {
            warn!(target: TARGET_WEB_REQUEST, "Failed to cache empty payload for {}: {}", key, e);
        }
        return Ok(Json(payload));
    }

    let mut payload = AggregatePayload::with_capacity(entity_names.len());
    for entity_name in &entity_names {
        let record = enricher::enrich_entity(state.generator.as_ref(), entity_name, year)
            .await
            .map_err(|e| {
                error!(target: TARGET_WEB_REQUEST, "Event enrichment failed for {}: {:#}", entity_name, e);
                ApiError::Internal
            })?;
        payload.push(record);
    }

    if let Err(e) = state.db.store_payload(&key, &payload).await {
        warn!(target: TARGET_WEB_REQUEST, "Failed to cache payload for {}: {}", key, e);
    }

    Ok(Json(payload))
}
