use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{AppResult, NonEmptyString};
use uuid::Uuid;

use crate::BoardId;

/// Unique identifier for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(Uuid);

impl ListId {
    /// Creates a new random list identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a list identifier from an existing UUID value.
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

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// An ordered column of cards within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    board_id: BoardId,
    title: NonEmptyString,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl List {
    /// Creates a new list with a validated title at the given position.
    pub fn new(board_id: BoardId, title: impl Into<String>, position: i32) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: ListId::new(),
            board_id,
            title: NonEmptyString::new(title)?,
            position,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a list from stored values.
    pub fn from_parts(
        id: ListId,
        board_id: BoardId,
        title: impl Into<String>,
        position: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            board_id,
            title: NonEmptyString::new(title)?,
            position,
            created_at,
            updated_at,
        })
    }

    /// Returns the list identifier.
    #[must_use]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Returns the parent board.
    #[must_use]
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the list title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the display position within the board, ascending.
    #[must_use]
    pub fn position(&self) -> i32 {
        self.position
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

    /// Moves the list to a new position within its board.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use crate::BoardId;

    use super::List;

    #[test]
    fn new_list_keeps_position_and_rejects_blank_title() {
        let board_id = BoardId::new();
        let Ok(list) = List::new(board_id, "To do", 3) else {
            panic!("list should build");
        };
        assert_eq!(list.position(), 3);
        assert_eq!(list.board_id(), board_id);
        assert!(List::new(board_id, " ", 1).is_err());
    }
}
