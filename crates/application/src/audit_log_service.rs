use std::sync::Arc;

use taskboard_core::{ActorIdentity, AppResult};
use taskboard_domain::{AuditLogEntry, CardId};

use crate::audit_ports::{AuditLogQuery, AuditRepository};

/// Newest-first window shown in a card's activity section.
pub const ENTITY_ACTIVITY_LIMIT: usize = 3;

/// Application service for reading the audit trail.
#[derive(Clone)]
pub struct AuditLogService {
    repository: Arc<dyn AuditRepository>,
}

impl AuditLogService {
    /// Creates an audit log service.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditRepository>) -> Self {
        Self { repository }
    }

    /// Lists the active organization's activity, newest first. The limit is
    /// clamped to 1..=200 and the offset capped at 5000.
    pub async fn list_for_org(
        &self,
        actor: &ActorIdentity,
        query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let org_id = actor.require_org()?;
        let capped = AuditLogQuery {
            limit: query.limit.clamp(1, 200),
            offset: query.offset.min(5_000),
        };

        self.repository.list_recent(&org_id, capped).await
    }

    /// Lists the newest activity entries for one card.
    pub async fn list_for_card(
        &self,
        actor: &ActorIdentity,
        card_id: CardId,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let org_id = actor.require_org()?;
        self.repository
            .list_for_entity(&org_id, card_id.to_string().as_str(), ENTITY_ACTIVITY_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use taskboard_core::{ActorIdentity, AppResult, OrgId};
    use taskboard_domain::{AuditLogEntry, CardId};

    use crate::audit_ports::{AuditEvent, AuditLogQuery, AuditRepository};

    use super::{AuditLogService, ENTITY_ACTIVITY_LIMIT};

    #[derive(Default)]
    struct RecordingAuditRepository {
        recent_queries: Mutex<Vec<AuditLogQuery>>,
        entity_queries: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl AuditRepository for RecordingAuditRepository {
        async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
            Ok(())
        }

        async fn list_recent(
            &self,
            _org_id: &OrgId,
            query: AuditLogQuery,
        ) -> AppResult<Vec<AuditLogEntry>> {
            self.recent_queries.lock().await.push(query);
            Ok(Vec::new())
        }

        async fn list_for_entity(
            &self,
            _org_id: &OrgId,
            entity_id: &str,
            limit: usize,
        ) -> AppResult<Vec<AuditLogEntry>> {
            self.entity_queries
                .lock()
                .await
                .push((entity_id.to_owned(), limit));
            Ok(Vec::new())
        }
    }

    fn actor() -> ActorIdentity {
        ActorIdentity::new(
            "user_1",
            "Ada",
            "https://img.example/ada.png",
            None,
            OrgId::new("org_1").ok(),
        )
    }

    #[tokio::test]
    async fn org_activity_queries_are_clamped() {
        let repository = Arc::new(RecordingAuditRepository::default());
        let service = AuditLogService::new(repository.clone());

        let listed = service
            .list_for_org(
                &actor(),
                AuditLogQuery {
                    limit: 0,
                    offset: 9_999,
                },
            )
            .await;
        assert!(listed.is_ok());

        let queries = repository.recent_queries.lock().await;
        assert_eq!(queries[0].limit, 1);
        assert_eq!(queries[0].offset, 5_000);
    }

    #[tokio::test]
    async fn card_activity_uses_the_fixed_window() {
        let repository = Arc::new(RecordingAuditRepository::default());
        let service = AuditLogService::new(repository.clone());
        let card_id = CardId::new();

        let listed = service.list_for_card(&actor(), card_id).await;
        assert!(listed.is_ok());

        let queries = repository.entity_queries.lock().await;
        assert_eq!(
            queries.as_slice(),
            &[(card_id.to_string(), ENTITY_ACTIVITY_LIMIT)]
        );
    }
}
