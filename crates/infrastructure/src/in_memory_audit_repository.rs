use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use taskboard_application::{AuditEvent, AuditLogQuery, AuditRepository};
use taskboard_core::{AppResult, OrgId};
use taskboard_domain::AuditLogEntry;

/// In-memory audit repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.entries.write().await.push(AuditLogEntry {
            id: Uuid::new_v4(),
            org_id: event.org_id,
            action: event.action.as_str().to_owned(),
            entity_id: event.entity_id,
            entity_type: event.entity_type.as_str().to_owned(),
            entity_title: event.entity_title,
            user_id: event.user_id,
            user_name: event.user_name,
            user_image: event.user_image,
            created_at: Utc::now(),
        });

        Ok(())
    }

    async fn list_recent(
        &self,
        org_id: &OrgId,
        query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;
        let mut values: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|entry| &entry.org_id == org_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(values
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn list_for_entity(
        &self,
        org_id: &OrgId,
        entity_id: &str,
        limit: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;
        let mut values: Vec<AuditLogEntry> = entries
            .iter()
            .filter(|entry| &entry.org_id == org_id && entry.entity_id == entity_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        values.truncate(limit);

        Ok(values)
    }
}
