//! Photo listing endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, ApiResult};
use crate::services::PhotoEntry;
use crate::AppState;

/// GET /photos-list
///
/// Returns `[{"name": ..., "date": "YYYY-MM-DD HH:MM:SS"}]`, oldest first.
pub async fn list_photos(State(state): State<AppState>) -> ApiResult<Json<Vec<PhotoEntry>>> {
    let lister = state.lister.clone();
    let photos = tokio::task::spawn_blocking(move || lister.list())
        .await
        .map_err(|e| ApiError::Internal(format!("Photo listing task failed: {}", e)))??;

    tracing::debug!("Listed {} photos", photos.len());
    Ok(Json(photos))
}
