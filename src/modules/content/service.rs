use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use schoolhub_core::{AppError, FileStorage};
use schoolhub_db::{OrderScope, next_order_position};
use schoolhub_models::{Resource, ResourceInput};

use crate::metrics::{track_content_created, track_content_deleted};
use crate::modules::uploads::UploadService;
use crate::utils::sql::{insert_statement, update_statement, write_error};

pub struct ContentService;

impl ContentService {
    fn not_found<R: Resource>() -> AppError {
        AppError::not_found(anyhow!("{} not found", R::NAME))
    }

    #[instrument(skip_all, fields(table = R::TABLE))]
    pub async fn list_admin<R: Resource>(db: &PgPool) -> Result<Vec<R::Row>, AppError> {
        let rows = sqlx::query_as::<_, R::Row>(&format!(
            "SELECT {} FROM {} ORDER BY {}",
            R::COLUMNS,
            R::TABLE,
            R::ADMIN_ORDER
        ))
        .fetch_all(db)
        .await?;

        Ok(rows)
    }

    #[instrument(skip_all, fields(table = R::TABLE))]
    pub async fn list_public<R: Resource>(db: &PgPool) -> Result<Vec<R::Row>, AppError> {
        let rows = sqlx::query_as::<_, R::Row>(&format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            R::COLUMNS,
            R::TABLE,
            R::public_predicate(),
            R::PUBLIC_ORDER
        ))
        .fetch_all(db)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(db), fields(table = R::TABLE))]
    pub async fn get<R: Resource>(db: &PgPool, id: Uuid) -> Result<R::Row, AppError> {
        sqlx::query_as::<_, R::Row>(&format!(
            "SELECT {} FROM {} WHERE id = $1",
            R::COLUMNS,
            R::TABLE
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(Self::not_found::<R>)
    }

    /// Published row only; hidden rows look missing to the public site.
    #[instrument(skip(db), fields(table = R::TABLE))]
    pub async fn get_public<R: Resource>(db: &PgPool, id: Uuid) -> Result<R::Row, AppError> {
        sqlx::query_as::<_, R::Row>(&format!(
            "SELECT {} FROM {} WHERE id = $1 AND {}",
            R::COLUMNS,
            R::TABLE,
            R::public_predicate()
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(Self::not_found::<R>)
    }

    /// Appends the row at `max(order_position) + 1`.
    #[instrument(skip_all, fields(table = R::TABLE))]
    pub async fn create<R: Resource>(db: &PgPool, dto: R::Create) -> Result<R::Row, AppError> {
        let mut tx = db.begin().await?;

        let position = next_order_position(&mut tx, OrderScope::Table(R::TABLE)).await?;
        let mut fields = dto.into_fields();
        fields.set("order_position", position);

        let row = insert_statement(R::TABLE, fields, R::COLUMNS)
            .build_query_as::<R::Row>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(e, R::NAME))?;

        tx.commit().await?;

        track_content_created(R::SLUG);
        info!(order_position = position, "{} created", R::NAME);
        Ok(row)
    }

    /// Writes only the supplied fields and bumps `updated_at`.
    #[instrument(skip(db, dto), fields(table = R::TABLE))]
    pub async fn update<R: Resource>(
        db: &PgPool,
        id: Uuid,
        dto: R::Update,
    ) -> Result<R::Row, AppError> {
        let fields = dto.into_fields();

        update_statement(R::TABLE, id, fields, R::COLUMNS)
            .build_query_as::<R::Row>()
            .fetch_optional(db)
            .await
            .map_err(|e| write_error(e, R::NAME))?
            .ok_or_else(Self::not_found::<R>)
    }

    #[instrument(skip(db), fields(table = R::TABLE))]
    pub async fn set_visibility<R: Resource>(
        db: &PgPool,
        id: Uuid,
        visible: bool,
    ) -> Result<R::Row, AppError> {
        sqlx::query_as::<_, R::Row>(&format!(
            "UPDATE {} SET {} = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            R::TABLE,
            R::VISIBILITY_COLUMN,
            R::COLUMNS
        ))
        .bind(visible)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(Self::not_found::<R>)
    }

    /// Deletes the row and its child rows in one transaction, then removes
    /// their stored images. Cleanup failures are logged only.
    #[instrument(skip(db, storage), fields(table = R::TABLE))]
    pub async fn delete<R: Resource>(
        db: &PgPool,
        storage: &dyn FileStorage,
        id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;
        let mut orphaned = Vec::new();

        for child in R::CHILDREN {
            match child.image_column {
                Some(column) => {
                    let urls = sqlx::query_scalar::<_, Option<String>>(&format!(
                        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
                        child.table, child.foreign_key, column
                    ))
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?;
                    orphaned.extend(urls.into_iter().flatten());
                }
                None => {
                    sqlx::query(&format!(
                        "DELETE FROM {} WHERE {} = $1",
                        child.table, child.foreign_key
                    ))
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        let row = sqlx::query_as::<_, R::Row>(&format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            R::TABLE,
            R::COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(Self::not_found::<R>)?;

        tx.commit().await?;

        orphaned.extend(R::image_urls(&row));
        UploadService::cleanup_urls(storage, &orphaned).await;

        track_content_deleted(R::SLUG);
        info!(objects = orphaned.len(), "{} deleted", R::NAME);
        Ok(())
    }

    pub async fn count<R: Resource>(db: &PgPool, visible_only: bool) -> Result<i64, AppError> {
        let sql = if visible_only {
            format!(
                "SELECT COUNT(*) FROM {} WHERE {}",
                R::TABLE,
                R::public_predicate()
            )
        } else {
            format!("SELECT COUNT(*) FROM {}", R::TABLE)
        };

        Ok(sqlx::query_scalar::<_, i64>(&sql).fetch_one(db).await?)
    }
}
