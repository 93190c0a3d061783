use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{AppResult, NonEmptyString};
use uuid::Uuid;

use crate::ListId;

/// Unique identifier for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    /// Creates a new random card identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a card identifier from an existing UUID value.
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

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A unit of work within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    list_id: ListId,
    title: NonEmptyString,
    description: Option<String>,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card with a validated title at the given position.
    pub fn new(list_id: ListId, title: impl Into<String>, position: i32) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: CardId::new(),
            list_id,
            title: NonEmptyString::new(title)?,
            description: None,
            position,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a card from stored values.
    pub fn from_parts(
        id: CardId,
        list_id: ListId,
        title: impl Into<String>,
        description: Option<String>,
        position: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            list_id,
            title: NonEmptyString::new(title)?,
            description,
            position,
            created_at,
            updated_at,
        })
    }

    /// Returns the card identifier.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the parent list.
    #[must_use]
    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the free-form description, if one was written.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the display position within the list, ascending.
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

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    /// Moves the card to a new position, possibly in another list.
    pub fn relocate(&mut self, list_id: ListId, position: i32) {
        self.list_id = list_id;
        self.position = position;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use crate::ListId;

    use super::Card;

    #[test]
    fn relocate_moves_the_card_across_lists() {
        let Ok(mut card) = Card::new(ListId::new(), "Fix bug", 1) else {
            panic!("card should build");
        };
        let target = ListId::new();
        card.relocate(target, 4);
        assert_eq!(card.list_id(), target);
        assert_eq!(card.position(), 4);
    }

    #[test]
    fn description_is_optional_and_replaceable() {
        let Ok(mut card) = Card::new(ListId::new(), "Fix bug", 1) else {
            panic!("card should build");
        };
        assert_eq!(card.description(), None);
        card.set_description(Some("Repro steps".to_owned()));
        assert_eq!(card.description(), Some("Repro steps"));
    }
}
