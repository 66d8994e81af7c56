//! # SchoolHub DB
//!
//! Database pool setup, embedded migrations and the ordering helper every
//! content table uses to append rows.
//!
//! ```ignore
//! use schoolhub_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await;
//! run_migrations(&pool).await?;
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

pub use sqlx::PgPool;

/// Connects to `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable. Called
/// once at startup, where failing fast is the only sensible outcome.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    info!(max_connections, "Database pool initialized");
    pool
}

/// Applies the migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Scope of an ordering sequence: a whole table, or the rows of a table that
/// share a parent (photos within one album).
#[derive(Debug, Clone, Copy)]
pub enum OrderScope {
    Table(&'static str),
    Parent {
        table: &'static str,
        column: &'static str,
        id: Uuid,
    },
}

impl OrderScope {
    fn lock_key(&self) -> String {
        match self {
            OrderScope::Table(table) => format!("order_position:{}", table),
            OrderScope::Parent { table, id, .. } => format!("order_position:{}:{}", table, id),
        }
    }
}

/// Returns `max(order_position) + 1` for the scope (1 when empty).
///
/// Takes a transaction-scoped advisory lock first, so two concurrent inserts
/// into the same scope serialize and never read the same maximum. The lock
/// is released when the caller's transaction commits or rolls back.
pub async fn next_order_position(
    tx: &mut Transaction<'_, Postgres>,
    scope: OrderScope,
) -> Result<i32, sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(scope.lock_key())
        .execute(&mut **tx)
        .await?;

    let next = match scope {
        OrderScope::Table(table) => {
            sqlx::query_scalar::<_, i32>(&format!(
                "SELECT COALESCE(MAX(order_position), 0) + 1 FROM {}",
                table
            ))
            .fetch_one(&mut **tx)
            .await?
        }
        OrderScope::Parent { table, column, id } => {
            sqlx::query_scalar::<_, i32>(&format!(
                "SELECT COALESCE(MAX(order_position), 0) + 1 FROM {} WHERE {} = $1",
                table, column
            ))
            .bind(id)
            .fetch_one(&mut **tx)
            .await?
        }
    };

    debug!(lock = %scope.lock_key(), next, "Computed next order position");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_keys_are_scoped() {
        let id = Uuid::nil();
        assert_eq!(OrderScope::Table("faqs").lock_key(), "order_position:faqs");
        assert_eq!(
            OrderScope::Parent {
                table: "gallery_photos",
                column: "album_id",
                id
            }
            .lock_key(),
            format!("order_position:gallery_photos:{}", id)
        );
    }
}
