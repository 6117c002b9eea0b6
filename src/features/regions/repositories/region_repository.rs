use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::regions::models::{Feeling, FeelingCounter, RegionRecord};

/// Region store operations consumed by the vote aggregator and the
/// temperature refresh controller
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// All regions of one province, in storage order
    async fn list_by_province(&self, province: &str) -> Result<Vec<RegionRecord>>;

    async fn find(&self, province: &str, name: &str) -> Result<Option<RegionRecord>>;

    /// Increments `feeling[0]` and `feeling[bucket]` in a single update.
    /// Returns false when no region matched.
    async fn increment_vote(
        &self,
        province: &str,
        name: &str,
        feeling: Feeling,
        bucket: u8,
    ) -> Result<bool>;

    async fn set_temperature(
        &self,
        province: &str,
        name: &str,
        temperature: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Overwrites all three counters of a region
    async fn set_counters(
        &self,
        province: &str,
        name: &str,
        hot: FeelingCounter,
        normal: FeelingCounter,
        cold: FeelingCounter,
    ) -> Result<bool>;
}

#[derive(Debug, FromRow)]
struct RegionRow {
    province: String,
    name: String,
    hot: Option<Vec<i64>>,
    normal: Option<Vec<i64>>,
    cold: Option<Vec<i64>>,
    temperature: Option<f64>,
    temp_updated_at: Option<DateTime<Utc>>,
    station_code: i32,
}

impl From<RegionRow> for RegionRecord {
    fn from(row: RegionRow) -> Self {
        Self {
            province: row.province,
            name: row.name,
            hot: RegionRecord::counter_from_slice(row.hot.as_deref().unwrap_or_default()),
            normal: RegionRecord::counter_from_slice(row.normal.as_deref().unwrap_or_default()),
            cold: RegionRecord::counter_from_slice(row.cold.as_deref().unwrap_or_default()),
            temperature: row.temperature,
            temp_updated_at: row.temp_updated_at,
            station_code: row.station_code,
        }
    }
}

/// Postgres-backed region store
pub struct PgRegionRepository {
    pool: PgPool,
}

impl PgRegionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepository for PgRegionRepository {
    async fn list_by_province(&self, province: &str) -> Result<Vec<RegionRecord>> {
        let rows = sqlx::query_as::<_, RegionRow>(
            r#"
            SELECT province, name, hot, normal, cold, temperature, temp_updated_at, station_code
            FROM regions
            WHERE province = $1
            ORDER BY id ASC
            "#,
        )
        .bind(province)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch regions for province {}: {:?}", province, e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, province: &str, name: &str) -> Result<Option<RegionRecord>> {
        let row = sqlx::query_as::<_, RegionRow>(
            r#"
            SELECT province, name, hot, normal, cold, temperature, temp_updated_at, station_code
            FROM regions
            WHERE province = $1 AND name = $2
            "#,
        )
        .bind(province)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch region {} {}: {:?}", province, name, e);
            AppError::Database(e)
        })?;

        Ok(row.map(Into::into))
    }

    async fn increment_vote(
        &self,
        province: &str,
        name: &str,
        feeling: Feeling,
        bucket: u8,
    ) -> Result<bool> {
        // Postgres arrays are 1-based: slot 0 (total) lives at [1]
        let column = feeling.as_str();
        let query = format!(
            "UPDATE regions SET {col}[1] = {col}[1] + 1, {col}[$3] = {col}[$3] + 1 \
             WHERE province = $1 AND name = $2",
            col = column
        );

        let result = sqlx::query(&query)
            .bind(province)
            .bind(name)
            .bind(i32::from(bucket) + 1)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record vote for {} {}: {:?}", province, name, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_temperature(
        &self,
        province: &str,
        name: &str,
        temperature: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE regions
            SET temperature = $3, temp_updated_at = $4
            WHERE province = $1 AND name = $2
            "#,
        )
        .bind(province)
        .bind(name)
        .bind(temperature)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to store temperature for {} {}: {:?}",
                province,
                name,
                e
            );
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_counters(
        &self,
        province: &str,
        name: &str,
        hot: FeelingCounter,
        normal: FeelingCounter,
        cold: FeelingCounter,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE regions
            SET hot = $3, normal = $4, cold = $5
            WHERE province = $1 AND name = $2
            "#,
        )
        .bind(province)
        .bind(name)
        .bind(hot.to_vec())
        .bind(normal.to_vec())
        .bind(cold.to_vec())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to overwrite counters for {} {}: {:?}",
                province,
                name,
                e
            );
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
