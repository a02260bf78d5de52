use anyhow::Context;
use axum::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diet::{DietType, NOT_SET};

/// The single diet restriction recorded for a user.
#[derive(Debug, Clone, FromRow)]
pub struct UserRestriction {
    pub user_id: Uuid,
    pub restriction_name: String,
    pub updated_at: OffsetDateTime,
}

#[async_trait]
pub trait RestrictionStore: Send + Sync {
    /// Set the user's diet preference and restriction row together (last write wins).
    /// Returns `None`, with nothing written, when the user does not exist.
    async fn save_diet(
        &self,
        user_id: Uuid,
        diet: Option<DietType>,
    ) -> anyhow::Result<Option<UserRestriction>>;
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<UserRestriction>>;
}

#[derive(Clone)]
pub struct PgRestrictionStore {
    db: PgPool,
}

impl PgRestrictionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RestrictionStore for PgRestrictionStore {
    async fn save_diet(
        &self,
        user_id: Uuid,
        diet: Option<DietType>,
    ) -> anyhow::Result<Option<UserRestriction>> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let updated = sqlx::query("UPDATE users SET diet_preference = $2 WHERE id = $1")
            .bind(user_id)
            .bind(diet.map(DietType::as_str))
            .execute(&mut *tx)
            .await
            .context("update diet preference")?;
        if updated.rows_affected() != 1 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, UserRestriction>(
            r#"
            INSERT INTO user_restrictions (user_id, restriction_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET restriction_name = EXCLUDED.restriction_name, updated_at = now()
            RETURNING user_id, restriction_name, updated_at
            "#,
        )
        .bind(user_id)
        .bind(diet.map(DietType::as_str).unwrap_or(NOT_SET))
        .fetch_one(&mut *tx)
        .await
        .context("upsert user restriction")?;

        tx.commit().await.context("commit tx")?;
        Ok(Some(row))
    }

    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<UserRestriction>> {
        let row = sqlx::query_as::<_, UserRestriction>(
            r#"
            SELECT user_id, restriction_name, updated_at
              FROM user_restrictions
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find user restriction")?;
        Ok(row)
    }
}
