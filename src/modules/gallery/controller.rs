use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::modules::uploads::controller::multipart_error;
use crate::modules::uploads::{UploadPolicy, UploadService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    AddPhotosDto, AlbumSummary, AlbumWithPhotos, BulkUploadResponse, GalleryPhoto,
    MAX_BULK_FILES, RejectedUpload, UpdatePhotoDto,
};
use super::service::GalleryService;

#[utoipa::path(
    get,
    path = "/api/public/gallery",
    responses((status = 200, description = "Published albums", body = Vec<AlbumSummary>)),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn list_public_albums(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlbumSummary>>, AppError> {
    Ok(Json(GalleryService::list_public_albums(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/gallery/{id}",
    params(("id" = Uuid, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Album with photos", body = AlbumWithPhotos),
        (status = 404, description = "Album not found or unpublished")
    ),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn get_public_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AlbumWithPhotos>, AppError> {
    Ok(Json(GalleryService::get_public_album(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/gallery-albums/{id}/photos",
    params(("id" = Uuid, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Album with its photos", body = AlbumWithPhotos),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Album not found")
    ),
    tag = "Gallery",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_photos(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AlbumWithPhotos>, AppError> {
    Ok(Json(GalleryService::get_album_with_photos(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/gallery-albums/{id}/photos",
    params(("id" = Uuid, Path, description = "Album ID")),
    request_body = AddPhotosDto,
    responses(
        (status = 201, description = "Photos added", body = Vec<GalleryPhoto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Album not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Gallery",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn add_photos(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AddPhotosDto>,
) -> Result<(StatusCode, Json<Vec<GalleryPhoto>>), AppError> {
    let photos = GalleryService::add_photos(&state.db, id, dto).await?;
    Ok((StatusCode::CREATED, Json(photos)))
}

/// Files are validated and stored one at a time. A rejected file is
/// reported and the rest of the batch continues.
#[utoipa::path(
    post,
    path = "/api/admin/gallery-albums/{id}/photos/upload",
    params(("id" = Uuid, Path, description = "Album ID")),
    request_body(
        content_type = "multipart/form-data",
        description = "Images in `files` fields. A `caption` field applies to the file fields \
            that follow it in the form; files sent before any caption get none."
    ),
    responses(
        (status = 200, description = "Upload report", body = BulkUploadResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Album not found")
    ),
    tag = "Gallery",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart))]
pub async fn upload_photos(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<BulkUploadResponse>, AppError> {
    GalleryService::ensure_album(&state.db, id).await?;

    let policy = UploadPolicy::new(state.storage_config.max_upload_bytes(), None);
    let mut caption: Option<String> = None;
    let mut seen = 0usize;
    let mut uploaded = Vec::new();
    let mut rejected = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("caption") => {
                let text = field.text().await.map_err(multipart_error)?;
                caption = Some(text.trim().to_string()).filter(|c| !c.is_empty());
            }
            Some("files") | Some("file") => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                seen += 1;

                if seen > MAX_BULK_FILES {
                    rejected.push(RejectedUpload {
                        file_name,
                        error: format!("At most {} files per upload", MAX_BULK_FILES),
                    });
                    continue;
                }

                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await.map_err(multipart_error)?;

                let stored = match UploadService::store(
                    state.storage.as_ref(),
                    policy,
                    "gallery",
                    content_type.as_deref(),
                    &content,
                )
                .await
                {
                    Ok(stored) => stored,
                    Err(e) => {
                        rejected.push(RejectedUpload {
                            file_name,
                            error: e.error.to_string(),
                        });
                        continue;
                    }
                };

                match GalleryService::insert_photo(&state.db, id, &stored.url, caption.as_deref())
                    .await
                {
                    Ok(photo) => uploaded.push(photo),
                    Err(e) => {
                        UploadService::cleanup_urls(state.storage.as_ref(), &[stored.url]).await;
                        return Err(e);
                    }
                }
            }
            _ => continue,
        }
    }

    info!(
        album_id = %id,
        uploaded = uploaded.len(),
        rejected = rejected.len(),
        "Bulk photo upload finished"
    );

    Ok(Json(BulkUploadResponse { uploaded, rejected }))
}

#[utoipa::path(
    put,
    path = "/api/admin/gallery-photos/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoDto,
    responses(
        (status = 200, description = "Photo updated", body = GalleryPhoto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Photo not found")
    ),
    tag = "Gallery",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_photo(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePhotoDto>,
) -> Result<Json<GalleryPhoto>, AppError> {
    Ok(Json(GalleryService::update_photo(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/gallery-photos/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Photo not found")
    ),
    tag = "Gallery",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_photo(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    GalleryService::delete_photo(&state.db, state.storage.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
