use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::HeatHealthError;
use crate::assistant::HeatAssistant;
use crate::models::HeatReport;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<HeatAssistant>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Every failure leaves the API as `{"error": ...}`
pub struct ApiError(HeatHealthError);

impl From<HeatHealthError> for ApiError {
    fn from(err: HeatHealthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("Error processing request: {}", self.0);
        } else {
            tracing::info!("Rejected request: {}", self.0);
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(health_check))
        .route("/sample", get(get_sample))
        .with_state(state)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<HeatReport>, ApiError> {
    let city = query.city.unwrap_or_default();
    let city = city.trim();
    if city.is_empty() {
        return Err(HeatHealthError::validation("City parameter is required").into());
    }

    tracing::info!("Fetching data for: {}", city);
    let report = state.assistant.report(city).await?;
    tracing::info!("Successfully processed data for {}", city);
    Ok(Json(report))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Local::now().to_rfc3339(),
    })
}

async fn get_sample() -> Json<HeatReport> {
    Json(HeatReport::sample())
}
