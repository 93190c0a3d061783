use std::sync::Arc;

use taskboard_core::{ActorIdentity, AppError, AppResult, OrgId};
use taskboard_domain::{AuditAction, AuditEntityType, Card, CardId};

use crate::audit_ports::{AuditEvent, AuditRepository};
use crate::card_ports::{
    CardRepository, CardWithList, CopyCardInput, CreateCardInput, DeleteCardInput,
    ReorderCardsInput, UpdateCardInput,
};
use crate::list_ports::ListRepository;

/// Application service for card operations.
#[derive(Clone)]
pub struct CardService {
    repository: Arc<dyn CardRepository>,
    lists: Arc<dyn ListRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl CardService {
    /// Creates a card service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CardRepository>,
        lists: Arc<dyn ListRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            lists,
            audit_repository,
        }
    }

    /// Creates a card at the end of its list.
    pub async fn create(&self, actor: &ActorIdentity, input: CreateCardInput) -> AppResult<Card> {
        let org_id = actor.require_org()?;
        input.validate()?;

        self.lists
            .find(&org_id, input.board_id, input.list_id)
            .await?
            .ok_or_else(|| AppError::NotFound("list not found".to_owned()))?;

        let position = self
            .repository
            .max_position(&org_id, input.list_id)
            .await?
            .map(|position| position + 1)
            .unwrap_or(1);

        let card = Card::new(input.list_id, input.title, position)?;
        self.repository.create(&org_id, card.clone()).await?;

        self.append_audit(actor, org_id, AuditAction::Create, &card)
            .await?;

        Ok(card)
    }

    /// Edits a card's title and/or description.
    pub async fn update(&self, actor: &ActorIdentity, input: UpdateCardInput) -> AppResult<Card> {
        let org_id = actor.require_org()?;
        input.validate()?;

        let mut card = self.require_card(&org_id, input.id).await?;
        if let Some(title) = input.title {
            card.rename(title)?;
        }
        if let Some(description) = input.description {
            card.set_description(Some(description));
        }
        self.repository.save(&org_id, card.clone()).await?;

        self.append_audit(actor, org_id, AuditAction::Update, &card)
            .await?;

        Ok(card)
    }

    /// Deletes a card and returns it.
    pub async fn delete(&self, actor: &ActorIdentity, input: DeleteCardInput) -> AppResult<Card> {
        let org_id = actor.require_org()?;

        let card = self.require_card(&org_id, input.id).await?;
        self.repository.delete(&org_id, input.id).await?;

        self.append_audit(actor, org_id, AuditAction::Delete, &card)
            .await?;

        Ok(card)
    }

    /// Duplicates a card at the end of the same list.
    pub async fn copy(&self, actor: &ActorIdentity, input: CopyCardInput) -> AppResult<Card> {
        let org_id = actor.require_org()?;

        let source = self.require_card(&org_id, input.id).await?;
        let position = self
            .repository
            .max_position(&org_id, source.list_id())
            .await?
            .map(|position| position + 1)
            .unwrap_or(1);

        let mut copy = Card::new(
            source.list_id(),
            format!("{} - Copy", source.title()),
            position,
        )?;
        copy.set_description(source.description().map(ToOwned::to_owned));
        self.repository.create(&org_id, copy.clone()).await?;

        self.append_audit(actor, org_id, AuditAction::Create, &copy)
            .await?;

        Ok(copy)
    }

    /// Applies a bulk list/position update to cards. Reorders are not
    /// recorded in the audit trail.
    pub async fn reorder(&self, actor: &ActorIdentity, input: ReorderCardsInput) -> AppResult<()> {
        let org_id = actor.require_org()?;
        input.validate()?;

        self.repository
            .reorder(&org_id, input.items.as_slice())
            .await
    }

    /// Returns a card joined with its parent list title.
    pub async fn find_with_list(
        &self,
        actor: &ActorIdentity,
        card_id: CardId,
    ) -> AppResult<CardWithList> {
        let org_id = actor.require_org()?;
        self.repository
            .find_with_list(&org_id, card_id)
            .await?
            .ok_or_else(|| AppError::NotFound("card not found".to_owned()))
    }

    async fn require_card(&self, org_id: &OrgId, card_id: CardId) -> AppResult<Card> {
        self.repository
            .find_in_org(org_id, card_id)
            .await?
            .ok_or_else(|| AppError::NotFound("card not found".to_owned()))
    }

    async fn append_audit(
        &self,
        actor: &ActorIdentity,
        org_id: OrgId,
        action: AuditAction,
        card: &Card,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent::recorded_by(
                actor,
                org_id,
                action,
                AuditEntityType::Card,
                card.id().to_string(),
                card.title(),
            ))
            .await
    }
}
