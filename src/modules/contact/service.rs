use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use schoolhub_core::{AppError, PaginationMeta};

use crate::metrics::track_contact_message_received;

use super::model::{
    CONTACT_MESSAGE_COLUMNS, ContactMessage, ContactMessageFilterParams, CreateContactMessageDto,
    PaginatedContactMessagesResponse,
};

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Message not found"))
}

pub struct ContactService;

impl ContactService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateContactMessageDto,
    ) -> Result<ContactMessage, AppError> {
        let phone = dto
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            "INSERT INTO contact_messages (name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            CONTACT_MESSAGE_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(dto.email.trim())
        .bind(phone)
        .bind(dto.subject.trim())
        .bind(dto.message.trim())
        .fetch_one(db)
        .await?;

        track_contact_message_received();
        info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: ContactMessageFilterParams,
    ) -> Result<PaginatedContactMessagesResponse, AppError> {
        let unread_only = filters.unread_only.unwrap_or(false);
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE ($1 = FALSE OR is_read = FALSE)",
        )
        .bind(unread_only)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {} FROM contact_messages
             WHERE ($1 = FALSE OR is_read = FALSE)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
            CONTACT_MESSAGE_COLUMNS
        ))
        .bind(unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedContactMessagesResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    pub async fn unread_count(db: &PgPool) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE",
        )
        .fetch_one(db)
        .await?)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {} FROM contact_messages WHERE id = $1",
            CONTACT_MESSAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    /// `read_at` keeps the first read time and is cleared when marked unread.
    #[instrument(skip(db))]
    pub async fn mark_read(
        db: &PgPool,
        id: Uuid,
        is_read: bool,
    ) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "UPDATE contact_messages
             SET is_read = $1,
                 read_at = CASE WHEN $1 THEN COALESCE(read_at, NOW()) ELSE NULL END
             WHERE id = $2
             RETURNING {}",
            CONTACT_MESSAGE_COLUMNS
        ))
        .bind(is_read)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
