use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{AppResult, NonEmptyString, OrgId};
use uuid::Uuid;

/// Unique identifier for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(Uuid);

impl BoardId {
    /// Creates a new random board identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a board identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A kanban board owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    org_id: OrgId,
    title: NonEmptyString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board with a validated title.
    pub fn new(org_id: OrgId, title: impl Into<String>) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: BoardId::new(),
            org_id,
            title: NonEmptyString::new(title)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a board from stored values.
    pub fn from_parts(
        id: BoardId,
        org_id: OrgId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            org_id,
            title: NonEmptyString::new(title)?,
            created_at,
            updated_at,
        })
    }

    /// Returns the board identifier.
    #[must_use]
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn org_id(&self) -> &OrgId {
        &self.org_id
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title with a validated value.
    pub fn rename(&mut self, title: impl Into<String>) -> AppResult<()> {
        self.title = NonEmptyString::new(title)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taskboard_core::OrgId;

    use super::Board;

    fn org() -> OrgId {
        OrgId::new("org_1").unwrap_or_else(|_| panic!("valid org id"))
    }

    #[test]
    fn new_board_rejects_blank_title() {
        assert!(Board::new(org(), "   ").is_err());
    }

    #[test]
    fn rename_replaces_the_title() {
        let Ok(mut board) = Board::new(org(), "Roadmap") else {
            panic!("board should build");
        };
        assert!(board.rename("Roadmap 2026").is_ok());
        assert_eq!(board.title(), "Roadmap 2026");
        assert!(board.rename("").is_err());
    }
}
