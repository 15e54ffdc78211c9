use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use picupload_core::Uploader;
use sanitize_filename::sanitize;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::multipart::upload_file;

pub struct AppState {
    pub uploader: Arc<Uploader>,
    /// Location prefix of stored paths
    pub location: String,
}

impl AppState {
    pub fn new(uploader: Arc<Uploader>, location: impl Into<String>) -> Self {
        Self {
            uploader,
            location: location.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    /// Target width; 0 or absent keeps the original size
    #[serde(default)]
    pub width: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Stored path, or `null` when the form carried no picture
    pub path: Option<String>,
}

/// Store the picture from the `get_picture` form field under `id`
pub async fn upload_image(
    Path(id): Path<String>,
    Query(params): Query<UploadParams>,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let id = sanitize(id);
    if id.is_empty() {
        return Err(ApiError::InvalidId);
    }
    info!("Uploading image {} (width {})", id, params.width);

    let path = upload_file(
        state.uploader.clone(),
        multipart,
        state.location.clone(),
        id,
        params.width,
    )
    .await?;

    Ok(Json(UploadResponse { path }))
}

pub async fn health() -> &'static str {
    "ok"
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/upload/{id}",
            post(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
