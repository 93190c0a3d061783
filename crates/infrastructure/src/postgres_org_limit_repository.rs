use async_trait::async_trait;
use sqlx::PgPool;

use taskboard_application::OrgLimitRepository;
use taskboard_core::{AppError, AppResult, OrgId};

/// PostgreSQL-backed free-tier board counter.
#[derive(Clone)]
pub struct PostgresOrgLimitRepository {
    pool: PgPool,
}

impl PostgresOrgLimitRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgLimitRepository for PostgresOrgLimitRepository {
    async fn board_count(&self, org_id: &OrgId) -> AppResult<u32> {
        let count: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT board_count FROM org_limits WHERE org_id = $1
            "#,
        )
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read board count: {error}")))?;

        Ok(count.map(|count| count.max(0) as u32).unwrap_or(0))
    }

    async fn increment(&self, org_id: &OrgId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO org_limits (org_id, board_count)
            VALUES ($1, 1)
            ON CONFLICT (org_id)
            DO UPDATE SET board_count = org_limits.board_count + 1, updated_at = NOW()
            "#,
        )
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to increment board count: {error}")))?;

        Ok(())
    }

    async fn decrement(&self, org_id: &OrgId) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE org_limits
            SET board_count = GREATEST(board_count - 1, 0), updated_at = NOW()
            WHERE org_id = $1
            "#,
        )
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to decrement board count: {error}")))?;

        Ok(())
    }
}
