use std::sync::Arc;

use taskboard_application::{CopyCardInput, DeleteCardInput};
use taskboard_domain::{BoardId, Card, CardId};

use crate::action::{ActionRunner, Mutation};
use crate::modal::ModalHandle;
use crate::ports::Notifier;

/// Controller for the copy/delete actions inside the card modal.
///
/// The two actions run on independent runners: a pending copy never disables
/// the delete button and vice versa. Either success closes the hosting
/// modal; either failure leaves it open behind an error toast.
pub struct CardActionsController {
    board_id: BoardId,
    copy_runner: ActionRunner<CopyCardInput, Card>,
    delete_runner: ActionRunner<DeleteCardInput, Card>,
}

impl CardActionsController {
    /// Creates a controller bound to the board hosting the card modal.
    #[must_use]
    pub fn new(
        board_id: BoardId,
        copy_mutation: Arc<dyn Mutation<Input = CopyCardInput, Output = Card>>,
        delete_mutation: Arc<dyn Mutation<Input = DeleteCardInput, Output = Card>>,
        notifier: Arc<dyn Notifier>,
        modal: ModalHandle,
    ) -> Self {
        let copy_notifier = notifier.clone();
        let copy_modal = modal.clone();
        let copy_runner = ActionRunner::new(copy_mutation)
            .on_success(move |card: &Card| {
                copy_notifier.success(format!("Card \"{}\" copied", card.title()).as_str());
                copy_modal.close();
            })
            .on_error({
                let notifier = notifier.clone();
                move |message| notifier.error(message)
            });

        let delete_notifier = notifier.clone();
        let delete_runner = ActionRunner::new(delete_mutation)
            .on_success(move |card: &Card| {
                delete_notifier.success(format!("Card \"{}\" deleted", card.title()).as_str());
                modal.close();
            })
            .on_error(move |message| notifier.error(message));

        Self {
            board_id,
            copy_runner,
            delete_runner,
        }
    }

    /// Duplicates the card shown in the modal.
    pub fn copy(&self, card_id: CardId) {
        self.copy_runner.execute(CopyCardInput {
            id: card_id,
            board_id: self.board_id,
        });
    }

    /// Deletes the card shown in the modal.
    pub fn delete(&self, card_id: CardId) {
        self.delete_runner.execute(DeleteCardInput {
            id: card_id,
            board_id: self.board_id,
        });
    }

    /// Returns whether a copy invocation is outstanding.
    #[must_use]
    pub fn is_copying(&self) -> bool {
        self.copy_runner.is_loading()
    }

    /// Returns whether a delete invocation is outstanding.
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.delete_runner.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use taskboard_application::{CopyCardInput, DeleteCardInput};
    use taskboard_domain::{BoardId, Card, CardId, ListId};
    use tokio::sync::Notify;

    use crate::action::{ActionOutcome, Mutation};
    use crate::modal::ModalHandle;
    use crate::ports::Notifier;

    use super::CardActionsController;

    struct ScriptedCopy {
        outcome: ActionOutcome<Card>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl Mutation for ScriptedCopy {
        type Input = CopyCardInput;
        type Output = Card;

        async fn run(&self, _input: CopyCardInput) -> ActionOutcome<Card> {
            if let Some(gate) = self.gate.as_ref() {
                gate.notified().await;
            }
            self.outcome.clone()
        }
    }

    struct ScriptedDelete {
        outcome: ActionOutcome<Card>,
    }

    #[async_trait]
    impl Mutation for ScriptedDelete {
        type Input = DeleteCardInput;
        type Output = Card;

        async fn run(&self, _input: DeleteCardInput) -> ActionOutcome<Card> {
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        successes: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            if let Ok(mut entries) = self.successes.lock() {
                entries.push(message.to_owned());
            }
        }

        fn error(&self, message: &str) {
            if let Ok(mut entries) = self.errors.lock() {
                entries.push(message.to_owned());
            }
        }
    }

    fn card(title: &str) -> Card {
        match Card::new(ListId::new(), title, 1) {
            Ok(card) => card,
            Err(error) => panic!("card should build: {error}"),
        }
    }

    async fn settle() {
        // Let spawned resolutions run on the current-thread test runtime.
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn copy_success_toasts_and_closes_the_modal() {
        let notifier = Arc::new(RecordingNotifier::default());
        let modal = ModalHandle::new();
        modal.open();

        let controller = CardActionsController::new(
            BoardId::new(),
            Arc::new(ScriptedCopy {
                outcome: ActionOutcome::Success(card("Fix bug - Copy")),
                gate: None,
            }),
            Arc::new(ScriptedDelete {
                outcome: ActionOutcome::Failed("unused".to_owned()),
            }),
            notifier.clone(),
            modal.clone(),
        );

        controller.copy(CardId::new());
        settle().await;

        assert!(!modal.is_open());
        assert_eq!(
            notifier
                .successes
                .lock()
                .map(|entries| entries.clone())
                .unwrap_or_default(),
            vec!["Card \"Fix bug - Copy\" copied".to_owned()]
        );
    }

    #[tokio::test]
    async fn delete_failure_toasts_and_keeps_the_modal_open() {
        let notifier = Arc::new(RecordingNotifier::default());
        let modal = ModalHandle::new();
        modal.open();

        let controller = CardActionsController::new(
            BoardId::new(),
            Arc::new(ScriptedCopy {
                outcome: ActionOutcome::Failed("unused".to_owned()),
                gate: None,
            }),
            Arc::new(ScriptedDelete {
                outcome: ActionOutcome::Failed("card not found".to_owned()),
            }),
            notifier.clone(),
            modal.clone(),
        );

        controller.delete(CardId::new());
        settle().await;

        assert!(modal.is_open());
        assert_eq!(
            notifier
                .errors
                .lock()
                .map(|entries| entries.clone())
                .unwrap_or_default(),
            vec!["card not found".to_owned()]
        );
    }

    #[tokio::test]
    async fn a_pending_copy_does_not_disable_delete() {
        let notifier = Arc::new(RecordingNotifier::default());
        let modal = ModalHandle::new();
        let gate = Arc::new(Notify::new());

        let controller = CardActionsController::new(
            BoardId::new(),
            Arc::new(ScriptedCopy {
                outcome: ActionOutcome::Success(card("Held - Copy")),
                gate: Some(gate.clone()),
            }),
            Arc::new(ScriptedDelete {
                outcome: ActionOutcome::Success(card("Held")),
            }),
            notifier.clone(),
            modal.clone(),
        );

        controller.copy(CardId::new());
        settle().await;

        assert!(controller.is_copying());
        assert!(!controller.is_deleting());

        controller.delete(CardId::new());
        settle().await;

        // The delete resolved on its own while the copy stayed pending.
        assert!(controller.is_copying());
        assert!(!controller.is_deleting());

        gate.notify_one();
        settle().await;
        assert!(!controller.is_copying());
    }
}
