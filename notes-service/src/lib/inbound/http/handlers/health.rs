use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::StorageMode;

pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            message: "Notes API is running".to_string(),
            status: "ok".to_string(),
            mode: state.storage_mode,
            timestamp: Utc::now(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub message: String,
    pub status: String,
    pub mode: StorageMode,
    pub timestamp: DateTime<Utc>,
}
