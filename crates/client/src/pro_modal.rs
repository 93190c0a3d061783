use std::sync::Arc;

use crate::action::{ActionRunner, Mutation};
use crate::modal::ModalHandle;
use crate::ports::{Navigator, Notifier};

/// Controller for the subscription upsell modal.
///
/// The upgrade button triggers a payment-session mutation with no input; on
/// success the shell performs a full navigation to the provider's URL, on
/// failure the modal stays open behind an error toast.
pub struct ProModalController {
    modal: ModalHandle,
    runner: ActionRunner<(), String>,
}

impl ProModalController {
    /// Creates a controller over the payment-redirect mutation.
    #[must_use]
    pub fn new(
        mutation: Arc<dyn Mutation<Input = (), Output = String>>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        modal: ModalHandle,
    ) -> Self {
        let runner = ActionRunner::new(mutation)
            .on_success(move |url: &String| {
                navigator.assign(url.as_str());
            })
            .on_error(move |message| {
                notifier.error(message);
            });

        Self { modal, runner }
    }

    /// Returns the modal handle for opening, closing, and subscribing.
    #[must_use]
    pub fn modal(&self) -> &ModalHandle {
        &self.modal
    }

    /// Starts the payment redirect flow.
    pub fn upgrade(&self) {
        self.runner.execute(());
    }

    /// Returns whether the redirect is being prepared; the upgrade button
    /// disables itself while this holds.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.runner.is_loading()
    }
}
