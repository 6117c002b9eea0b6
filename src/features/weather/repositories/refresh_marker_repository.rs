use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::weather::models::RefreshMarker;

/// Key of the marker row in `system_info`
const MARKER_KIND: &str = "last_temp_update";

#[async_trait]
pub trait RefreshMarkerRepository: Send + Sync {
    async fn get(&self) -> Result<Option<RefreshMarker>>;

    /// Creates or replaces the marker
    async fn upsert(&self, marker: &RefreshMarker) -> Result<()>;

    async fn delete(&self) -> Result<()>;
}

#[derive(Debug, FromRow)]
struct MarkerRow {
    updated_at: DateTime<Utc>,
    status: String,
}

pub struct PgRefreshMarkerRepository {
    pool: PgPool,
}

impl PgRefreshMarkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshMarkerRepository for PgRefreshMarkerRepository {
    async fn get(&self) -> Result<Option<RefreshMarker>> {
        let row = sqlx::query_as::<_, MarkerRow>(
            r#"
            SELECT updated_at, status
            FROM system_info
            WHERE kind = $1
            "#,
        )
        .bind(MARKER_KIND)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read refresh marker: {:?}", e);
            AppError::Database(e)
        })?;

        row.map(|row| {
            Ok(RefreshMarker {
                updated_at: row.updated_at,
                status: row.status.parse()?,
            })
        })
        .transpose()
    }

    async fn upsert(&self, marker: &RefreshMarker) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO system_info (kind, updated_at, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind) DO UPDATE
            SET updated_at = EXCLUDED.updated_at, status = EXCLUDED.status
            "#,
        )
        .bind(MARKER_KIND)
        .bind(marker.updated_at)
        .bind(marker.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write refresh marker: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        sqlx::query("DELETE FROM system_info WHERE kind = $1")
            .bind(MARKER_KIND)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete refresh marker: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}
