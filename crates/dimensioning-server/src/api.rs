//! HTTP API
//!
//! | Method | Path                   | Body                       |
//! |--------|------------------------|----------------------------|
//! | POST   | `/api/dimensionnement` | `DimensioningRequestDto`   |
//! | POST   | `/api/mos`             | `QosRequestDto`            |
//! | GET    | `/api/codecs`          |                            |
//! | GET    | `/api/health`          |                            |
//!
//! Handlers do nothing but convert between wire DTOs and engine values, so
//! an HTTP response carries exactly what the engine computed.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use ngn_dimensioning_core::wire::{
    CodecCatalogDto, DimensioningRequestDto, DimensioningResponseDto, QosRequestDto,
    QosResponseDto, codec_catalog_dto,
};
use ngn_dimensioning_core::{DimensioningRequest, DimensioningService, QosRequest};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, Result};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: DimensioningService,
}

impl AppState {
    pub fn new(service: DimensioningService) -> Self {
        Self { service }
    }
}

/// Build the router with CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/dimensionnement", post(dimension))
        .route("/api/mos", post(estimate_mos))
        .route("/api/codecs", get(list_codecs))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(bind_address: &str, service: DimensioningService) -> Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let app = create_router(AppState::new(service));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
    }
}

async fn dimension(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DimensioningRequestDto>, JsonRejection>,
) -> std::result::Result<Json<DimensioningResponseDto>, ApiError> {
    let Json(dto) = payload?;
    let request = DimensioningRequest::try_from(&dto)?;
    let result = state.service.dimension(&request)?;
    Ok(Json(DimensioningResponseDto::from(&result)))
}

async fn estimate_mos(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QosRequestDto>, JsonRejection>,
) -> std::result::Result<Json<QosResponseDto>, ApiError> {
    let Json(dto) = payload?;
    let request = QosRequest::try_from(&dto)?;
    let result = state.service.estimate_quality(&request)?;
    Ok(Json(QosResponseDto::from(&result)))
}

async fn list_codecs(State(state): State<AppState>) -> Json<CodecCatalogDto> {
    Json(codec_catalog_dto(&state.service.codecs()))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
