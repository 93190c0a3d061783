use std::sync::Arc;

use taskboard_core::{ActorIdentity, AppError, AppResult, OrgId};
use taskboard_domain::{AuditAction, AuditEntityType, BoardId, Card, List, ListId};

use crate::audit_ports::{AuditEvent, AuditRepository};
use crate::board_ports::BoardRepository;
use crate::card_ports::CardRepository;
use crate::list_ports::{
    CopyListInput, CreateListInput, DeleteListInput, ListRepository, ReorderListsInput,
    UpdateListInput,
};

/// Application service for list operations.
#[derive(Clone)]
pub struct ListService {
    repository: Arc<dyn ListRepository>,
    boards: Arc<dyn BoardRepository>,
    cards: Arc<dyn CardRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ListService {
    /// Creates a list service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ListRepository>,
        boards: Arc<dyn BoardRepository>,
        cards: Arc<dyn CardRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            boards,
            cards,
            audit_repository,
        }
    }

    /// Creates a list at the end of its board.
    pub async fn create(&self, actor: &ActorIdentity, input: CreateListInput) -> AppResult<List> {
        let org_id = actor.require_org()?;
        input.validate()?;
        self.require_board(&org_id, input.board_id).await?;

        let position = self
            .repository
            .max_position(&org_id, input.board_id)
            .await?
            .map(|position| position + 1)
            .unwrap_or(1);

        let list = List::new(input.board_id, input.title, position)?;
        self.repository.create(&org_id, list.clone()).await?;

        self.append_audit(actor, org_id, AuditAction::Create, &list)
            .await?;

        Ok(list)
    }

    /// Renames a list.
    pub async fn rename(&self, actor: &ActorIdentity, input: UpdateListInput) -> AppResult<List> {
        let org_id = actor.require_org()?;
        input.validate()?;

        let mut list = self.require_list(&org_id, input.board_id, input.id).await?;
        list.rename(input.title)?;
        self.repository.save(&org_id, list.clone()).await?;

        self.append_audit(actor, org_id, AuditAction::Update, &list)
            .await?;

        Ok(list)
    }

    /// Deletes a list and returns it.
    pub async fn delete(&self, actor: &ActorIdentity, input: DeleteListInput) -> AppResult<List> {
        let org_id = actor.require_org()?;

        let list = self.require_list(&org_id, input.board_id, input.id).await?;
        self.repository
            .delete(&org_id, input.board_id, input.id)
            .await?;

        self.append_audit(actor, org_id, AuditAction::Delete, &list)
            .await?;

        Ok(list)
    }

    /// Duplicates a list with its cards, appended at the end of the board.
    pub async fn copy(&self, actor: &ActorIdentity, input: CopyListInput) -> AppResult<List> {
        let org_id = actor.require_org()?;

        let source = self.require_list(&org_id, input.board_id, input.id).await?;
        let source_cards = self.cards.list_for_list(&org_id, source.id()).await?;

        let position = self
            .repository
            .max_position(&org_id, input.board_id)
            .await?
            .map(|position| position + 1)
            .unwrap_or(1);

        let copy = List::new(
            input.board_id,
            format!("{} - Copy", source.title()),
            position,
        )?;

        let mut copied_cards = Vec::with_capacity(source_cards.len());
        for card in &source_cards {
            let mut cloned = Card::new(copy.id(), card.title(), card.position())?;
            cloned.set_description(card.description().map(ToOwned::to_owned));
            copied_cards.push(cloned);
        }

        self.repository
            .insert_copy(&org_id, copy.clone(), copied_cards)
            .await?;

        self.append_audit(actor, org_id, AuditAction::Create, &copy)
            .await?;

        Ok(copy)
    }

    /// Applies a bulk position update to a board's lists. Reorders are not
    /// recorded in the audit trail.
    pub async fn reorder(&self, actor: &ActorIdentity, input: ReorderListsInput) -> AppResult<()> {
        let org_id = actor.require_org()?;
        input.validate()?;
        self.require_board(&org_id, input.board_id).await?;

        self.repository
            .reorder(&org_id, input.board_id, input.items.as_slice())
            .await
    }

    /// Lists a board's lists in display order.
    pub async fn list_for_board(
        &self,
        actor: &ActorIdentity,
        board_id: BoardId,
    ) -> AppResult<Vec<List>> {
        let org_id = actor.require_org()?;
        self.repository.list_for_board(&org_id, board_id).await
    }

    async fn require_board(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<()> {
        self.boards
            .find(org_id, board_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("board not found".to_owned()))
    }

    async fn require_list(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        list_id: ListId,
    ) -> AppResult<List> {
        self.repository
            .find(org_id, board_id, list_id)
            .await?
            .ok_or_else(|| AppError::NotFound("list not found".to_owned()))
    }

    async fn append_audit(
        &self,
        actor: &ActorIdentity,
        org_id: OrgId,
        action: AuditAction,
        list: &List,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent::recorded_by(
                actor,
                org_id,
                action,
                AuditEntityType::List,
                list.id().to_string(),
                list.title(),
            ))
            .await
    }
}

#[cfg(test)]
mod tests;
