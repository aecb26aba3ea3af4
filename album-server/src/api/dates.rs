//! Date correction endpoint

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::services::DateUpdate;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// POST /update-dates
///
/// Body: `[{"name": "a.jpg", "date": "2020-01-01 00:00:00"}, ...]`. The body
/// is parsed as JSON whatever its `Content-Type`.
pub async fn update_dates(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let batch: Vec<DateUpdate> = serde_json::from_slice(&body).map_err(|e| {
        ApiError::BadRequest(format!(
            "Expected a JSON array of {{\"name\", \"date\"}} objects: {}",
            e
        ))
    })?;

    let updater = state.updater.clone();
    tokio::task::spawn_blocking(move || updater.apply(batch))
        .await
        .map_err(|e| ApiError::Internal(format!("Date update task failed: {}", e)))??;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
    }))
}
