use anyhow::anyhow;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::modules::uploads::model::{DeleteUploadDto, UploadQuery, UploadResponse};
use crate::modules::uploads::service::{UploadPolicy, UploadService};
use crate::state::AppState;
use crate::validator::{QueryParams, ValidatedJson};

pub(crate) fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), anyhow!(err.body_text()))
}

#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    params(UploadQuery),
    request_body(content_type = "multipart/form-data", description = "One image in the `file` field"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file in the request"),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "Request body too large"),
        (status = 422, description = "Rejected: size, type or folder")
    ),
    tag = "Uploads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart), fields(admin = %admin.email()))]
pub async fn upload_image(
    State(state): State<AppState>,
    admin: AdminUser,
    QueryParams(query): QueryParams<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let policy = UploadPolicy::new(
        state.storage_config.max_upload_bytes(),
        query.max_size_mb,
    );

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await.map_err(multipart_error)?;

        let uploaded = UploadService::store(
            state.storage.as_ref(),
            policy,
            &query.folder,
            content_type.as_deref(),
            &content,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(uploaded)));
    }

    Err(AppError::bad_request(anyhow!(
        "Multipart field 'file' is required"
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/uploads",
    request_body = DeleteUploadDto,
    responses(
        (status = 204, description = "Object removed, or the URL was not ours"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid URL")
    ),
    tag = "Uploads",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn delete_upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<DeleteUploadDto>,
) -> Result<StatusCode, AppError> {
    if !UploadService::delete_by_url(state.storage.as_ref(), &dto.url).await? {
        tracing::debug!(url = %dto.url, "Ignoring delete for a URL outside storage");
    }
    Ok(StatusCode::NO_CONTENT)
}
