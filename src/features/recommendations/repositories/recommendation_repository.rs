use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::recommendations::models::{
    Category, RecommendationDocument, RecommendationItem,
};

#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Items of a document in list order; empty when the key is unknown
    async fn find_document(&self, document_key: &str) -> Result<RecommendationDocument>;

    /// Returns false when no item matched
    async fn increment_likes(
        &self,
        document_key: &str,
        category: Category,
        name: &str,
    ) -> Result<bool>;

    /// Bumps `shown_count` of every item of the document with this name,
    /// in either category. Returns the number of items updated.
    async fn increment_shown(&self, document_key: &str, name: &str) -> Result<u64>;
}

#[derive(Debug, FromRow)]
struct ItemRow {
    category: String,
    name: String,
    likes: i64,
    shown_count: i64,
}

pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn find_document(&self, document_key: &str) -> Result<RecommendationDocument> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT category, name, likes, shown_count
            FROM recommendation_items
            WHERE feeling_key = $1
            ORDER BY category, position
            "#,
        )
        .bind(document_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load recommendations {}: {:?}", document_key, e);
            AppError::Database(e)
        })?;

        let mut document = RecommendationDocument::default();
        for row in rows {
            let category: Category = match row.category.parse() {
                Ok(category) => category,
                Err(_) => {
                    tracing::warn!(
                        "Ignoring recommendation '{}' with unknown category '{}'",
                        row.name,
                        row.category
                    );
                    continue;
                }
            };
            document
                .items_mut(category)
                .push(RecommendationItem::new(row.name, row.likes, row.shown_count));
        }

        Ok(document)
    }

    async fn increment_likes(
        &self,
        document_key: &str,
        category: Category,
        name: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE recommendation_items
            SET likes = likes + 1
            WHERE feeling_key = $1 AND category = $2 AND name = $3
            "#,
        )
        .bind(document_key)
        .bind(category.as_str())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to like recommendation {}: {:?}", name, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_shown(&self, document_key: &str, name: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE recommendation_items
            SET shown_count = shown_count + 1
            WHERE feeling_key = $1 AND name = $2
            "#,
        )
        .bind(document_key)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count recommendation {}: {:?}", name, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}
