use std::sync::Arc;

use taskboard_application::CreateListInput;
use taskboard_core::FieldErrors;
use taskboard_domain::{BoardId, List};
use tokio::sync::watch;

use crate::action::{ActionRunner, ActionState, Mutation};
use crate::ports::{Navigator, Notifier};

/// Controller for the inline list-creation form at the end of a board.
///
/// Successful creation leaves edit mode and requests a data refresh; any
/// failure keeps the form open with the draft visible so the title can be
/// corrected and resubmitted.
pub struct ListFormController {
    board_id: BoardId,
    is_editing: watch::Sender<bool>,
    runner: ActionRunner<CreateListInput, List>,
}

impl ListFormController {
    /// Creates a controller for one board's list form.
    #[must_use]
    pub fn new(
        board_id: BoardId,
        mutation: Arc<dyn Mutation<Input = CreateListInput, Output = List>>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let is_editing = watch::Sender::new(false);

        let editing = is_editing.clone();
        let success_notifier = notifier.clone();
        let runner = ActionRunner::new(mutation)
            .on_success(move |list: &List| {
                success_notifier.success(format!("List \"{}\" created", list.title()).as_str());
                editing.send_replace(false);
                navigator.refresh();
            })
            .on_error(move |message| {
                notifier.error(message);
            });

        Self {
            board_id,
            is_editing,
            runner,
        }
    }

    /// Switches the form into edit mode.
    pub fn enable_editing(&self) {
        self.is_editing.send_replace(true);
    }

    /// Dismisses the form without submitting.
    pub fn disable_editing(&self) {
        self.is_editing.send_replace(false);
    }

    /// Returns whether the form is in edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        *self.is_editing.borrow()
    }

    /// Subscribes to edit-mode transitions.
    #[must_use]
    pub fn subscribe_editing(&self) -> watch::Receiver<bool> {
        self.is_editing.subscribe()
    }

    /// Submits the draft title for the ambient board.
    pub fn submit(&self, title: impl Into<String>) {
        self.runner.execute(CreateListInput {
            board_id: self.board_id,
            title: title.into(),
        });
    }

    /// Returns whether a submission is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.runner.is_loading()
    }

    /// Returns the per-field messages of the last rejected submission.
    #[must_use]
    pub fn field_errors(&self) -> Option<FieldErrors> {
        self.runner.field_errors()
    }

    /// Subscribes to submission state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ActionState<List>> {
        self.runner.subscribe()
    }
}
