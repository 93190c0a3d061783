use async_trait::async_trait;
use taskboard_core::{AppResult, FieldErrors, OrgId};
use taskboard_domain::{BoardId, Card, CardId, ListId};

use crate::validation::{validate_description, validate_title};

/// Input payload for card creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCardInput {
    /// Board the card's list belongs to.
    pub board_id: BoardId,
    /// List the card is created in.
    pub list_id: ListId,
    /// Card title.
    pub title: String,
}

impl CreateCardInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_title(&mut errors, "title", self.title.as_str());

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Input payload for card edits; unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCardInput {
    /// Card to edit.
    pub id: CardId,
    /// Board the card belongs to.
    pub board_id: BoardId,
    /// New title, if changed.
    pub title: Option<String>,
    /// New description, if changed.
    pub description: Option<String>,
}

impl UpdateCardInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = self.title.as_deref() {
            validate_title(&mut errors, "title", title);
        }
        if let Some(description) = self.description.as_deref() {
            validate_description(&mut errors, "description", description);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Input payload for card deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCardInput {
    /// Card to delete.
    pub id: CardId,
    /// Board the card belongs to.
    pub board_id: BoardId,
}

/// Input payload for card duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCardInput {
    /// Card to duplicate.
    pub id: CardId,
    /// Board the card belongs to.
    pub board_id: BoardId,
}

/// One card's target list and position in a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    /// Card to move.
    pub id: CardId,
    /// Target list; differs from the current one when the card moves
    /// across lists.
    pub list_id: ListId,
    /// Target display position.
    pub position: i32,
}

/// Input payload for bulk card reordering within a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderCardsInput {
    /// Board whose cards are reordered.
    pub board_id: BoardId,
    /// Target positions, one entry per moved card.
    pub items: Vec<CardPosition>,
}

impl ReorderCardsInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.items.is_empty() {
            errors.push("items", "Items are required");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A card joined with its parent list's title, for detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardWithList {
    /// The card itself.
    pub card: Card,
    /// Title of the parent list.
    pub list_title: String,
}

/// Repository port for card persistence.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Creates a new card.
    async fn create(&self, org_id: &OrgId, card: Card) -> AppResult<()>;

    /// Saves changes to an existing card.
    async fn save(&self, org_id: &OrgId, card: Card) -> AppResult<()>;

    /// Finds a card anywhere inside the organization.
    async fn find_in_org(&self, org_id: &OrgId, card_id: CardId) -> AppResult<Option<Card>>;

    /// Finds a card joined with its parent list title.
    async fn find_with_list(
        &self,
        org_id: &OrgId,
        card_id: CardId,
    ) -> AppResult<Option<CardWithList>>;

    /// Lists a list's cards in ascending position order.
    async fn list_for_list(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Vec<Card>>;

    /// Returns the highest position currently used in a list.
    async fn max_position(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Option<i32>>;

    /// Deletes a card.
    async fn delete(&self, org_id: &OrgId, card_id: CardId) -> AppResult<()>;

    /// Applies a bulk list/position update to an organization's cards.
    async fn reorder(&self, org_id: &OrgId, items: &[CardPosition]) -> AppResult<()>;
}
