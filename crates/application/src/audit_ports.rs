use async_trait::async_trait;
use taskboard_core::{ActorIdentity, AppResult, OrgId};
use taskboard_domain::{AuditAction, AuditEntityType, AuditLogEntry};

/// Canonical audit event payload emitted after a successful entity change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Organization partition key for the event.
    pub org_id: OrgId,
    /// Action kind.
    pub action: AuditAction,
    /// Identifier of the changed entity.
    pub entity_id: String,
    /// Kind of the changed entity.
    pub entity_type: AuditEntityType,
    /// Entity title at the time of the change.
    pub entity_title: String,
    /// Acting user's provider id.
    pub user_id: String,
    /// Acting user's display name.
    pub user_name: String,
    /// Acting user's avatar URL.
    pub user_image: String,
}

impl AuditEvent {
    /// Builds an event attributed to the given actor.
    #[must_use]
    pub fn recorded_by(
        actor: &ActorIdentity,
        org_id: OrgId,
        action: AuditAction,
        entity_type: AuditEntityType,
        entity_id: impl Into<String>,
        entity_title: impl Into<String>,
    ) -> Self {
        Self {
            org_id,
            action,
            entity_id: entity_id.into(),
            entity_type,
            entity_title: entity_title.into(),
            user_id: actor.user_id().to_owned(),
            user_name: actor.display_name().to_owned(),
            user_image: actor.avatar_url().to_owned(),
        }
    }
}

/// Query inputs for the organization activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
}

/// Repository port for the append-only audit trail.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends a single audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;

    /// Lists an organization's entries, newest first.
    async fn list_recent(
        &self,
        org_id: &OrgId,
        query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>>;

    /// Lists the newest entries for one entity, newest first.
    async fn list_for_entity(
        &self,
        org_id: &OrgId,
        entity_id: &str,
        limit: usize,
    ) -> AppResult<Vec<AuditLogEntry>>;
}
