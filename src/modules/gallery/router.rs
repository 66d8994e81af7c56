use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::modules::content::resource_router;
use crate::state::AppState;

use super::controller::{add_photos, delete_photo, list_photos, update_photo, upload_photos};
use super::model::{GalleryAlbum, MAX_BULK_FILES};

/// Album CRUD plus the photo routes hanging off an album.
pub fn init_gallery_admin_router(max_upload_bytes: usize) -> Router<AppState> {
    let bulk_limit = max_upload_bytes.saturating_mul(MAX_BULK_FILES);

    resource_router::<GalleryAlbum>()
        .route("/{id}/photos", get(list_photos).post(add_photos))
        .route(
            "/{id}/photos/upload",
            post(upload_photos).layer(DefaultBodyLimit::max(bulk_limit)),
        )
}

pub fn init_photos_router() -> Router<AppState> {
    Router::new().route("/{id}", put(update_photo).delete(delete_photo))
}
