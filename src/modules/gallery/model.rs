pub use schoolhub_models::gallery::*;

/// Upper bound on files in one bulk upload request.
pub const MAX_BULK_FILES: usize = 50;

pub const PHOTO_COLUMNS: &str =
    "id, album_id, image_url, caption, order_position, created_at, updated_at";
