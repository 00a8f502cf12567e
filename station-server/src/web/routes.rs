//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::stations::StationError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/refresh", post(refresh_stations))
        .route("/api/stations/:name/departures", get(station_departures))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations, from cache when possible.
async fn list_stations(State(state): State<AppState>) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.repository.stations().await?;
    Ok(Json(StationsResponse::from_stations(&stations)))
}

/// Re-fetch the station list. Serves the previous list if the fetch fails.
async fn refresh_stations(
    State(state): State<AppState>,
) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.repository.refresh().await?;
    Ok(Json(StationsResponse::from_stations(&stations)))
}

/// Query parameters for the departures endpoint.
#[derive(Debug, Deserialize)]
struct DeparturesQuery {
    /// Only show departures from this platform.
    platform: Option<String>,
}

/// Upcoming departures for one station, soonest first.
///
/// Departures are never cached; every request goes to the source.
async fn station_departures(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DeparturesQuery>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let stations = state.repository.stations().await?;
    let station = stations
        .iter()
        .find(|s| s.id() == name)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {}", name),
        })?;

    let mut departures = state.source.departures(station).await?;
    if let Some(platform) = &query.platform {
        departures.retain(|d| &d.platform == platform);
    }
    departures.sort_by_key(|d| d.etd);

    let now = Utc::now();
    Ok(Json(DeparturesResponse {
        station: StationResult::from(station),
        departures: departures
            .iter()
            .map(|d| DepartureResult::from_departure(d, now))
            .collect(),
    }))
}

/// Errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Upstream { message: String },
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        match e {
            StationError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
