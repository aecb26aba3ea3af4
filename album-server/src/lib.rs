//! album-server library
//!
//! Serves a flat photo directory with resolved dates and accepts manual date
//! corrections, persisted in the date store.
//!
//! Routes:
//! - `GET /photos-list`: photos with resolved dates, oldest first
//! - `POST /update-dates`: store date corrections
//! - `GET /health`: health check
//! - anything else: static files under the configured static root

use album_common::{DateStore, ServerConfig};
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::services::{DateResolver, DateUpdater, PhotoLister};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub lister: PhotoLister,
    pub updater: DateUpdater,
}

impl AppState {
    /// Wire the services around a single date store
    pub fn new(config: ServerConfig) -> Self {
        let store = DateStore::new(config.dates_file.clone());
        let resolver = DateResolver::new(store.clone(), config.file_time);
        let lister = PhotoLister::new(
            resolver,
            config.photo_dir.clone(),
            config.extensions.clone(),
        );
        let updater = DateUpdater::new(store);

        Self {
            config: Arc::new(config),
            lister,
            updater,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let static_files = ServeDir::new(&state.config.static_root);

    Router::new()
        .route("/photos-list", get(api::list_photos))
        .route("/update-dates", post(api::update_dates))
        .merge(api::health_routes())
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
