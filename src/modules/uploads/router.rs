use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::state::AppState;

use super::controller::{delete_upload, upload_image};

/// Headroom above the file limit for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn init_uploads_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload_image).delete(delete_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD))
}
