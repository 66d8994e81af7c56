use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{info, instrument};

use schoolhub_core::AppError;

use super::model::{SettingsResponse, SiteSettings, UpdateSettingsDto};

pub struct SettingsService;

impl SettingsService {
    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool) -> Result<BTreeMap<String, String>, AppError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT key, value FROM site_settings ORDER BY key ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn get_typed(db: &PgPool) -> Result<SiteSettings, AppError> {
        Ok(SiteSettings::from_map(&Self::get_all(db).await?))
    }

    pub async fn get_response(db: &PgPool) -> Result<SettingsResponse, AppError> {
        Ok(SettingsResponse::from_map(Self::get_all(db).await?))
    }

    pub async fn get_value(db: &PgPool, key: &str) -> Result<Option<String>, AppError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT value FROM site_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(db)
                .await?,
        )
    }

    /// Upserts every entry in one transaction and returns the new state.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        dto: UpdateSettingsDto,
    ) -> Result<SettingsResponse, AppError> {
        let entries = dto.into_entries()?;
        let count = entries.len();

        let mut tx = db.begin().await?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO site_settings (key, value, updated_at) VALUES ($1, $2, NOW())
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(updated = count, "Site settings updated");
        Self::get_response(db).await
    }
}
