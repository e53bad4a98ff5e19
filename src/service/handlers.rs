use axum::{extract::State, http::Uri, Json};
use serde::{Deserialize, Serialize};

use crate::http::ApiError;
use crate::service::app::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemStatus {
    pub service: String,
    pub version: String,
    pub status: String,
    pub uptime_secs: u64,
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let info = &state.info;
    Json(SystemStatus {
        service: info.name.to_string(),
        version: info.version.to_string(),
        status: "operational".to_string(),
        uptime_secs: info.started_at.elapsed().as_secs(),
    })
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::not_found(uri.path())
}
