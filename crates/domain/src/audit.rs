//! Audit trail records and the human-readable message derivation used by
//! every history view.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{AppError, OrgId};
use uuid::Uuid;

/// Stable audit actions emitted after a successful entity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a board, list, or card is created (including copies).
    Create,
    /// Emitted when a board, list, or card is renamed or edited.
    Update,
    /// Emitted when a board, list, or card is deleted.
    Delete,
}

impl AuditAction {
    /// Returns the stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown audit action value '{value}'"
            ))),
        }
    }
}

/// Entity kinds recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    /// A board owned by an organization.
    Board,
    /// A list within a board.
    List,
    /// A card within a list.
    Card,
}

impl AuditEntityType {
    /// Returns the stable storage value for this entity kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Board => "BOARD",
            Self::List => "LIST",
            Self::Card => "CARD",
        }
    }
}

impl FromStr for AuditEntityType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BOARD" => Ok(Self::Board),
            "LIST" => Ok(Self::List),
            "CARD" => Ok(Self::Card),
            _ => Err(AppError::Validation(format!(
                "unknown audit entity type value '{value}'"
            ))),
        }
    }
}

/// One immutable entry of an organization's audit trail.
///
/// Entries are appended after a successful entity change and never updated
/// or deleted afterwards. `action` and `entity_type` keep the raw stored
/// values: history written by newer deployments may carry action kinds this
/// build does not know, and display must degrade instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: Uuid,
    /// Organization partition key.
    pub org_id: OrgId,
    /// Stored action value, `CREATE`/`UPDATE`/`DELETE` for known kinds.
    pub action: String,
    /// Identifier of the changed entity.
    pub entity_id: String,
    /// Stored entity kind value, `BOARD`/`LIST`/`CARD` for known kinds.
    pub entity_type: String,
    /// Entity title at the time of the change, verbatim user text.
    pub entity_title: String,
    /// Acting user's provider id.
    pub user_id: String,
    /// Acting user's display name at the time of the change.
    pub user_name: String,
    /// Acting user's avatar URL at the time of the change.
    pub user_image: String,
    /// Creation timestamp; entries display newest-first.
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Derives the human-readable sentence for this entry.
    ///
    /// The result depends only on `action`, `entity_type`, and
    /// `entity_title`. The entity kind is ASCII-lowercased; the title is
    /// quoted verbatim, whitespace and casing preserved. Unknown stored
    /// actions produce an explicit fallback sentence.
    #[must_use]
    pub fn message(&self) -> String {
        let entity_type = self.entity_type.to_ascii_lowercase();
        let entity_title = self.entity_title.as_str();

        match self.action.as_str() {
            "CREATE" => format!("created {entity_type} \"{entity_title}\""),
            "UPDATE" => format!("updated {entity_type} \"{entity_title}\""),
            "DELETE" => format!("deleted {entity_type} \"{entity_title}\""),
            _ => format!("unknown action for {entity_type} \"{entity_title}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use proptest::prelude::*;
    use taskboard_core::OrgId;
    use uuid::Uuid;

    use super::{AuditAction, AuditEntityType, AuditLogEntry};

    fn entry(action: &str, entity_type: &str, entity_title: &str) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            org_id: OrgId::new("org_1").unwrap_or_else(|_| panic!("valid org id")),
            action: action.to_owned(),
            entity_id: "entity-1".to_owned(),
            entity_type: entity_type.to_owned(),
            entity_title: entity_title.to_owned(),
            user_id: "user_1".to_owned(),
            user_name: "Ada".to_owned(),
            user_image: "https://img.example/ada.png".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_card_message() {
        assert_eq!(
            entry("CREATE", "CARD", "Fix bug").message(),
            "created card \"Fix bug\""
        );
    }

    #[test]
    fn update_and_delete_messages() {
        assert_eq!(
            entry("UPDATE", "LIST", "Doing").message(),
            "updated list \"Doing\""
        );
        assert_eq!(
            entry("DELETE", "BOARD", "Roadmap").message(),
            "deleted board \"Roadmap\""
        );
    }

    #[test]
    fn unknown_action_falls_back_instead_of_failing() {
        assert_eq!(
            entry("ARCHIVE", "BOARD", "Sprint 3").message(),
            "unknown action for board \"Sprint 3\""
        );
    }

    #[test]
    fn title_is_quoted_verbatim() {
        assert_eq!(
            entry("CREATE", "CARD", "  MiXeD Case  ").message(),
            "created card \"  MiXeD Case  \""
        );
        assert_eq!(entry("DELETE", "LIST", "").message(), "deleted list \"\"");
    }

    #[test]
    fn action_and_entity_type_roundtrip_storage_values() {
        let restored = AuditAction::from_str(AuditAction::Update.as_str());
        assert_eq!(restored.ok(), Some(AuditAction::Update));

        let restored = AuditEntityType::from_str(AuditEntityType::Card.as_str());
        assert_eq!(restored.ok(), Some(AuditEntityType::Card));

        assert!(AuditAction::from_str("ARCHIVE").is_err());
        assert!(AuditEntityType::from_str("COMMENT").is_err());
    }

    proptest! {
        #[test]
        fn known_actions_start_with_verb_and_end_with_quoted_title(
            action_index in 0usize..3,
            entity_type in "[A-Za-z]{1,12}",
            entity_title in "\\PC*",
        ) {
            let (action, verb) = [
                ("CREATE", "created"),
                ("UPDATE", "updated"),
                ("DELETE", "deleted"),
            ][action_index];

            let message = entry(action, entity_type.as_str(), entity_title.as_str()).message();
            let expected_suffix = format!("\"{entity_title}\"");
            prop_assert!(message.starts_with(verb));
            prop_assert!(message.ends_with(&expected_suffix));
        }

        #[test]
        fn unknown_actions_use_the_fallback_sentence(
            action in "[a-z]{1,12}",
            entity_title in "\\PC*",
        ) {
            // Known storage values are uppercase, so a lowercase action is
            // never in the known set.
            let message = entry(action.as_str(), "BOARD", entity_title.as_str()).message();
            prop_assert_eq!(
                message,
                format!("unknown action for board \"{entity_title}\"")
            );
        }

        #[test]
        fn derivation_is_pure(
            action in "[A-Z]{1,8}",
            entity_type in "[A-Za-z]{1,12}",
            entity_title in "\\PC*",
        ) {
            let record = entry(action.as_str(), entity_type.as_str(), entity_title.as_str());
            prop_assert_eq!(record.message(), record.message());
        }
    }
}
