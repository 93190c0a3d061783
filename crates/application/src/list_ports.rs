use async_trait::async_trait;
use taskboard_core::{AppResult, FieldErrors, OrgId};
use taskboard_domain::{BoardId, Card, List, ListId};

use crate::validation::validate_title;

/// Input payload for list creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListInput {
    /// Board the list belongs to.
    pub board_id: BoardId,
    /// List title.
    pub title: String,
}

impl CreateListInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_title(&mut errors, "title", self.title.as_str());

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Input payload for list renames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListInput {
    /// List to rename.
    pub id: ListId,
    /// Board the list belongs to.
    pub board_id: BoardId,
    /// New list title.
    pub title: String,
}

impl UpdateListInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_title(&mut errors, "title", self.title.as_str());

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Input payload for list deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteListInput {
    /// List to delete.
    pub id: ListId,
    /// Board the list belongs to.
    pub board_id: BoardId,
}

/// Input payload for list duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyListInput {
    /// List to duplicate.
    pub id: ListId,
    /// Board the list belongs to.
    pub board_id: BoardId,
}

/// One list's target position in a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPosition {
    /// List to move.
    pub id: ListId,
    /// Target display position.
    pub position: i32,
}

/// Input payload for bulk list reordering within a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderListsInput {
    /// Board whose lists are reordered.
    pub board_id: BoardId,
    /// Target positions, one entry per moved list.
    pub items: Vec<ListPosition>,
}

impl ReorderListsInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.items.is_empty() {
            errors.push("items", "Items are required");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Repository port for list persistence.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Creates a new list.
    async fn create(&self, org_id: &OrgId, list: List) -> AppResult<()>;

    /// Saves changes to an existing list.
    async fn save(&self, org_id: &OrgId, list: List) -> AppResult<()>;

    /// Finds a list inside a board owned by the organization.
    async fn find(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        list_id: ListId,
    ) -> AppResult<Option<List>>;

    /// Lists a board's lists in ascending position order.
    async fn list_for_board(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Vec<List>>;

    /// Returns the highest position currently used in a board.
    async fn max_position(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<i32>>;

    /// Deletes a list and its cards.
    async fn delete(&self, org_id: &OrgId, board_id: BoardId, list_id: ListId) -> AppResult<()>;

    /// Inserts a duplicated list together with its cloned cards.
    async fn insert_copy(&self, org_id: &OrgId, list: List, cards: Vec<Card>) -> AppResult<()>;

    /// Applies a bulk position update to a board's lists.
    async fn reorder(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        items: &[ListPosition],
    ) -> AppResult<()>;
}
