//! REST API endpoints for the skycast-service.
//!
//! This module provides HTTP endpoints for weather lookups and search history.
//!
//! # Concurrency and Lock Acquisition
//!
//! The only shared mutable state is `state.store` (Mutex), acquired briefly
//! for database operations. The outbound weather request is made before the
//! store lock is taken, so a slow provider never blocks history reads.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Gateway
//! errors map to the statuses in the table below; store errors on the
//! history endpoints return HTTP 500.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use skycast_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use skycast_store::StoredLookup;
use skycast_types::{LookupRecord, WeatherRecord};

use crate::state::AppState;

/// History entries returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", get(get_weather))
        .route("/api/history", get(get_history).delete(clear_history))
        .fallback(unknown_route)
}

/// Service metadata response for the root endpoint.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: IndexEndpoints,
}

/// Endpoint listing included in the root response.
#[derive(Debug, Serialize)]
pub struct IndexEndpoints {
    pub weather: &'static str,
    pub history: &'static str,
    pub clear_history: &'static str,
}

/// Root endpoint with service metadata.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        service: "skycast",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: IndexEndpoints {
            weather: "GET /api/weather?city={name}",
            history: "GET /api/history?limit={n}",
            clear_history: "DELETE /api/history",
        },
    })
}

/// Query parameters for the weather endpoint.
#[derive(Debug, Deserialize)]
struct WeatherParams {
    city: Option<String>,
}

/// Fetch current weather for a city and record the lookup.
///
/// A failure to record the lookup is logged and otherwise ignored; the
/// weather response is still returned.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherRecord>, AppError> {
    let city = params.city.as_deref().map(str::trim).unwrap_or("");
    if city.is_empty() {
        return Err(AppError::BadRequest("City parameter is required".to_string()));
    }

    let record = state.weather.fetch_current(city).await?;

    {
        let store = state.store.lock().await;
        if let Err(e) = store.append(&LookupRecord::from(&record)) {
            warn!("Failed to record lookup of {}: {}", record.city, e);
        }
    }

    Ok(Json(record))
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<i64>,
}

/// History listing response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub history: Vec<StoredLookup>,
}

/// List recent lookups, newest first.
///
/// A missing, zero, or negative limit falls back to the default.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = match params.limit {
        Some(n) if n > 0 => n.min(u32::MAX as i64) as u32,
        _ => DEFAULT_HISTORY_LIMIT,
    };

    let store = state.store.lock().await;
    let history = store.recent(limit)?;

    Ok(Json(HistoryResponse {
        count: history.len(),
        history,
    }))
}

/// Response for the clear-history endpoint.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    pub deleted_count: usize,
}

/// Delete all history entries.
async fn clear_history(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>, AppError> {
    let store = state.store.lock().await;
    let deleted_count = store.clear()?;

    Ok(Json(ClearResponse {
        message: "Search history cleared successfully",
        deleted_count,
    }))
}

/// Fallback for unmatched routes, so 404s carry the same JSON error shape.
async fn unknown_route() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(u16),
    Timeout,
    Unavailable(String),
    Store(skycast_store::Error),
    Internal(String),
}

impl From<skycast_provider::Error> for AppError {
    fn from(e: skycast_provider::Error) -> Self {
        use skycast_provider::Error;
        match e {
            Error::EmptyCity => AppError::BadRequest("City parameter is required".to_string()),
            Error::CityNotFound(city) => {
                AppError::NotFound(format!("City '{}' not found", city))
            }
            Error::UpstreamStatus { status } => AppError::Upstream(status),
            Error::Timeout => AppError::Timeout,
            Error::Unavailable(e) => AppError::Unavailable(e.to_string()),
            Error::Contract(msg) => {
                AppError::Internal(format!("Unexpected weather service response: {}", msg))
            }
        }
    }
}

impl From<skycast_store::Error> for AppError {
    fn from(e: skycast_store::Error) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(code) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("Weather service returned status {}", code),
            ),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Weather service request timed out".to_string(),
            ),
            AppError::Unavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Weather service unavailable: {}", msg),
            ),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
