use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::photo_store::PhotoStore;

pub mod photos;

/// Shared handler state: the directory-backed store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PhotoStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health probe, photo API, raw uploads.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/photos", get(photos::list_photos))
        .route("/api/upload", post(photos::upload_photo))
        .route("/uploads/:filename", get(photos::serve_upload))
        // The original service caps nothing; without this, multipart bodies
        // over 2 MiB are rejected before the handler runs.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
