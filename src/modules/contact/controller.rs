use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::{JsonBody, QueryParams, ValidatedJson};

use super::model::{
    ContactMessage, ContactMessageFilterParams, CreateContactMessageDto, MarkReadDto,
    PaginatedContactMessagesResponse, UnreadCount,
};
use super::service::ContactService;

/// Send a message to the school office
#[utoipa::path(
    post,
    path = "/api/public/contact",
    request_body = CreateContactMessageDto,
    responses(
        (status = 201, description = "Message stored", body = ContactMessage),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation error"),
        (status = 429, description = "Too many messages")
    ),
    tag = "Contact"
)]
#[instrument(skip(state, dto))]
pub async fn submit_message(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateContactMessageDto>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let message = ContactService::create(&state.db, dto).await?;

    if state.email_config.notifications_enabled() {
        let email = EmailService::new(state.email_config.clone());
        let notification = message.clone();
        tokio::spawn(async move { email.notify_contact_message(&notification).await });
    }

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/admin/messages",
    params(ContactMessageFilterParams),
    responses(
        (status = 200, description = "Messages, newest first", body = PaginatedContactMessagesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(filters): QueryParams<ContactMessageFilterParams>,
) -> Result<Json<PaginatedContactMessagesResponse>, AppError> {
    Ok(Json(ContactService::list(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/messages/unread-count",
    responses(
        (status = 200, description = "Unread message count", body = UnreadCount),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn unread_count(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<UnreadCount>, AppError> {
    let unread = ContactService::unread_count(&state.db).await?;
    Ok(Json(UnreadCount { unread }))
}

#[utoipa::path(
    get,
    path = "/api/admin/messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = ContactMessage),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(ContactService::get(&state.db, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/admin/messages/{id}/read",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = MarkReadDto,
    responses(
        (status = 200, description = "Read flag updated", body = ContactMessage),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    JsonBody(dto): JsonBody<MarkReadDto>,
) -> Result<Json<ContactMessage>, AppError> {
    Ok(Json(ContactService::mark_read(&state.db, id, dto.is_read).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ContactService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
