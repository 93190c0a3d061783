use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use taskboard_application::{AuditEvent, AuditLogQuery, AuditRepository};
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::AuditLogEntry;

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: uuid::Uuid,
    org_id: String,
    action: String,
    entity_id: String,
    entity_type: String,
    entity_title: String,
    user_id: String,
    user_name: String,
    user_image: String,
    created_at: DateTime<Utc>,
}

impl AuditLogRow {
    fn into_entry(self) -> AppResult<AuditLogEntry> {
        Ok(AuditLogEntry {
            id: self.id,
            org_id: OrgId::new(self.org_id)?,
            action: self.action,
            entity_id: self.entity_id,
            entity_type: self.entity_type,
            entity_title: self.entity_title,
            user_id: self.user_id,
            user_name: self.user_name,
            user_image: self.user_image,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                org_id,
                action,
                entity_id,
                entity_type,
                entity_title,
                user_id,
                user_name,
                user_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.org_id.as_str())
        .bind(event.action.as_str())
        .bind(event.entity_id)
        .bind(event.entity_type.as_str())
        .bind(event.entity_title)
        .bind(event.user_id)
        .bind(event.user_name)
        .bind(event.user_image)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }

    async fn list_recent(
        &self,
        org_id: &OrgId,
        query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, org_id, action, entity_id, entity_type, entity_title,
                user_id, user_name, user_image, created_at
            FROM audit_log_entries
            WHERE org_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(org_id.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list audit log entries: {error}"))
        })?;

        rows.into_iter().map(AuditLogRow::into_entry).collect()
    }

    async fn list_for_entity(
        &self,
        org_id: &OrgId,
        entity_id: &str,
        limit: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, org_id, action, entity_id, entity_type, entity_title,
                user_id, user_name, user_image, created_at
            FROM audit_log_entries
            WHERE org_id = $1 AND entity_id = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(org_id.as_str())
        .bind(entity_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list entity audit entries: {error}"))
        })?;

        rows.into_iter().map(AuditLogRow::into_entry).collect()
    }
}
