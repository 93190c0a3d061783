use async_trait::async_trait;
use taskboard_core::{AppResult, FieldErrors, OrgId};
use taskboard_domain::{Board, BoardId};

use crate::validation::validate_title;

/// Input payload for board creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardInput {
    /// Board title.
    pub title: String,
}

impl CreateBoardInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_title(&mut errors, "title", self.title.as_str());

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Input payload for board renames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBoardInput {
    /// Board to rename.
    pub id: BoardId,
    /// New board title.
    pub title: String,
}

impl UpdateBoardInput {
    /// Checks field rules and returns per-field messages on violation.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_title(&mut errors, "title", self.title.as_str());

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Repository port for board persistence.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Creates a new board.
    async fn create(&self, board: Board) -> AppResult<()>;

    /// Saves changes to an existing board.
    async fn save(&self, board: Board) -> AppResult<()>;

    /// Finds a board inside an organization.
    async fn find(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<Board>>;

    /// Lists an organization's boards, newest first.
    async fn list_for_org(&self, org_id: &OrgId) -> AppResult<Vec<Board>>;

    /// Deletes a board and everything it contains.
    async fn delete(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<()>;
}

/// Repository port for the free-tier board counter.
#[async_trait]
pub trait OrgLimitRepository: Send + Sync {
    /// Returns how many free-tier boards the organization currently uses.
    async fn board_count(&self, org_id: &OrgId) -> AppResult<u32>;

    /// Increments the counter after a free-tier board is created.
    async fn increment(&self, org_id: &OrgId) -> AppResult<()>;

    /// Decrements the counter after a free-tier board is deleted.
    async fn decrement(&self, org_id: &OrgId) -> AppResult<()>;
}
