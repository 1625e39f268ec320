use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::settings::SettingsRepository;

pub async fn index() -> impl IntoResponse {
    "hello world!"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(
    State(settings_repo): State<Arc<dyn SettingsRepository>>,
) -> impl IntoResponse {
    if settings_repo.check().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "settings": "available"
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "settings": "unavailable"
            })),
        )
    }
}
