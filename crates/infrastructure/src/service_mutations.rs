//! Service-backed implementations of the client's mutation boundary.
//!
//! Each adapter runs the input's field validation first, then dispatches to
//! the application service for the actor it was built with. Every service
//! error is normalized into an operational outcome here, so the action
//! runner never sees a raw fault.

use async_trait::async_trait;

use taskboard_application::{
    BillingService, CardService, CopyCardInput, CreateListInput, DeleteCardInput, ListService,
};
use taskboard_client::{ActionOutcome, Mutation};
use taskboard_core::{ActorIdentity, AppResult};
use taskboard_domain::{Card, List};

fn normalized<T>(result: AppResult<T>) -> ActionOutcome<T> {
    match result {
        Ok(data) => ActionOutcome::Success(data),
        Err(error) => ActionOutcome::Failed(error.to_string()),
    }
}

/// Creates a list through [`ListService`] for one actor.
pub struct CreateListMutation {
    service: ListService,
    actor: ActorIdentity,
}

impl CreateListMutation {
    /// Binds the mutation to a service and the acting identity.
    #[must_use]
    pub fn new(service: ListService, actor: ActorIdentity) -> Self {
        Self { service, actor }
    }
}

#[async_trait]
impl Mutation for CreateListMutation {
    type Input = CreateListInput;
    type Output = List;

    async fn run(&self, input: CreateListInput) -> ActionOutcome<List> {
        if let Err(field_errors) = input.validate() {
            return ActionOutcome::Invalid(field_errors);
        }

        normalized(self.service.create(&self.actor, input).await)
    }
}

/// Duplicates a card through [`CardService`] for one actor.
pub struct CopyCardMutation {
    service: CardService,
    actor: ActorIdentity,
}

impl CopyCardMutation {
    /// Binds the mutation to a service and the acting identity.
    #[must_use]
    pub fn new(service: CardService, actor: ActorIdentity) -> Self {
        Self { service, actor }
    }
}

#[async_trait]
impl Mutation for CopyCardMutation {
    type Input = CopyCardInput;
    type Output = Card;

    async fn run(&self, input: CopyCardInput) -> ActionOutcome<Card> {
        normalized(self.service.copy(&self.actor, input).await)
    }
}

/// Deletes a card through [`CardService`] for one actor.
pub struct DeleteCardMutation {
    service: CardService,
    actor: ActorIdentity,
}

impl DeleteCardMutation {
    /// Binds the mutation to a service and the acting identity.
    #[must_use]
    pub fn new(service: CardService, actor: ActorIdentity) -> Self {
        Self { service, actor }
    }
}

#[async_trait]
impl Mutation for DeleteCardMutation {
    type Input = DeleteCardInput;
    type Output = Card;

    async fn run(&self, input: DeleteCardInput) -> ActionOutcome<Card> {
        normalized(self.service.delete(&self.actor, input).await)
    }
}

/// Starts the payment redirect flow through [`BillingService`] for one actor.
pub struct CheckoutRedirectMutation {
    service: BillingService,
    actor: ActorIdentity,
}

impl CheckoutRedirectMutation {
    /// Binds the mutation to a service and the acting identity.
    #[must_use]
    pub fn new(service: BillingService, actor: ActorIdentity) -> Self {
        Self { service, actor }
    }
}

#[async_trait]
impl Mutation for CheckoutRedirectMutation {
    type Input = ();
    type Output = String;

    async fn run(&self, _input: ()) -> ActionOutcome<String> {
        normalized(self.service.checkout_redirect(&self.actor).await)
    }
}
