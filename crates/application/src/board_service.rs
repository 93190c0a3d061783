use std::sync::Arc;

use taskboard_core::{ActorIdentity, AppError, AppResult};
use taskboard_domain::{AuditAction, AuditEntityType, Board, BoardId};

use crate::audit_ports::{AuditEvent, AuditRepository};
use crate::billing_service::BillingService;
use crate::board_ports::{BoardRepository, CreateBoardInput, OrgLimitRepository, UpdateBoardInput};

/// Number of boards an organization can create without a subscription.
pub const MAX_FREE_BOARDS: u32 = 5;

/// Application service for board operations.
#[derive(Clone)]
pub struct BoardService {
    repository: Arc<dyn BoardRepository>,
    limits: Arc<dyn OrgLimitRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    billing_service: BillingService,
}

impl BoardService {
    /// Creates a board service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        limits: Arc<dyn OrgLimitRepository>,
        audit_repository: Arc<dyn AuditRepository>,
        billing_service: BillingService,
    ) -> Self {
        Self {
            repository,
            limits,
            audit_repository,
            billing_service,
        }
    }

    /// Creates a board, enforcing the free-tier limit for unsubscribed
    /// organizations.
    pub async fn create(&self, actor: &ActorIdentity, input: CreateBoardInput) -> AppResult<Board> {
        let org_id = actor.require_org()?;
        input.validate()?;

        let subscribed = self.billing_service.is_org_subscribed(&org_id).await?;
        if !subscribed {
            let used = self.limits.board_count(&org_id).await?;
            if used >= MAX_FREE_BOARDS {
                return Err(AppError::Forbidden(
                    "You have reached your limit of free boards. Please upgrade to create more."
                        .to_owned(),
                ));
            }
        }

        let board = Board::new(org_id.clone(), input.title)?;
        self.repository.create(board.clone()).await?;

        if !subscribed {
            self.limits.increment(&org_id).await?;
        }

        self.audit_repository
            .append_event(AuditEvent::recorded_by(
                actor,
                org_id,
                AuditAction::Create,
                AuditEntityType::Board,
                board.id().to_string(),
                board.title(),
            ))
            .await?;

        Ok(board)
    }

    /// Renames a board.
    pub async fn rename(&self, actor: &ActorIdentity, input: UpdateBoardInput) -> AppResult<Board> {
        let org_id = actor.require_org()?;
        input.validate()?;

        let mut board = self
            .repository
            .find(&org_id, input.id)
            .await?
            .ok_or_else(|| AppError::NotFound("board not found".to_owned()))?;

        board.rename(input.title)?;
        self.repository.save(board.clone()).await?;

        self.audit_repository
            .append_event(AuditEvent::recorded_by(
                actor,
                org_id,
                AuditAction::Update,
                AuditEntityType::Board,
                board.id().to_string(),
                board.title(),
            ))
            .await?;

        Ok(board)
    }

    /// Deletes a board and returns it, releasing a free-tier slot for
    /// unsubscribed organizations.
    pub async fn delete(&self, actor: &ActorIdentity, board_id: BoardId) -> AppResult<Board> {
        let org_id = actor.require_org()?;

        let board = self
            .repository
            .find(&org_id, board_id)
            .await?
            .ok_or_else(|| AppError::NotFound("board not found".to_owned()))?;

        self.repository.delete(&org_id, board_id).await?;

        if !self.billing_service.is_org_subscribed(&org_id).await? {
            self.limits.decrement(&org_id).await?;
        }

        self.audit_repository
            .append_event(AuditEvent::recorded_by(
                actor,
                org_id,
                AuditAction::Delete,
                AuditEntityType::Board,
                board.id().to_string(),
                board.title(),
            ))
            .await?;

        Ok(board)
    }

    /// Returns one board or a not-found error.
    pub async fn find(&self, actor: &ActorIdentity, board_id: BoardId) -> AppResult<Board> {
        let org_id = actor.require_org()?;
        self.repository
            .find(&org_id, board_id)
            .await?
            .ok_or_else(|| AppError::NotFound("board not found".to_owned()))
    }

    /// Lists the active organization's boards, newest first.
    pub async fn list_for_org(&self, actor: &ActorIdentity) -> AppResult<Vec<Board>> {
        let org_id = actor.require_org()?;
        self.repository.list_for_org(&org_id).await
    }
}

#[cfg(test)]
mod tests;
