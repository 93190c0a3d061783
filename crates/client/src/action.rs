//! The action-execution contract: a uniform wrapper around server mutations
//! so every mutating view behaves identically on pending, success, and error.

use std::sync::Arc;

use async_trait::async_trait;
use taskboard_core::FieldErrors;
use tokio::sync::watch;

/// Resolution of one mutation invocation.
///
/// Expected failures are data, not panics: validation problems come back
/// per-field, operational problems as a single message. A mutation resolves
/// with exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    /// The mutation succeeded and produced its payload.
    Success(T),
    /// The input was rejected; messages are keyed by field.
    Invalid(FieldErrors),
    /// The mutation failed operationally (authorization, not-found,
    /// transport), normalized into a human-readable message.
    Failed(String),
}

/// An external, asynchronous, side-effecting operation invoked by the client.
///
/// Implementations must resolve with an [`ActionOutcome`] for every expected
/// failure mode rather than panic; the runner assumes that normalization
/// already happened at this boundary.
#[async_trait]
pub trait Mutation: Send + Sync {
    /// Typed input payload.
    type Input: Send + 'static;
    /// Typed success payload.
    type Output: Clone + Send + Sync + 'static;

    /// Runs the mutation to resolution.
    async fn run(&self, input: Self::Input) -> ActionOutcome<Self::Output>;
}

/// Lifecycle of the most recent invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    /// No invocation has been issued yet.
    Idle,
    /// An invocation is outstanding.
    Pending,
    /// The last resolution carried data.
    Succeeded,
    /// The last resolution carried field errors or an error message.
    Failed,
}

/// Observable snapshot of the last invocation's outcome.
///
/// While pending, the previous resolution's fields stay visible so a view
/// can keep showing standing errors during a retry; each new resolution then
/// fully overwrites the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionState<O> {
    phase: ActionPhase,
    field_errors: Option<FieldErrors>,
    error: Option<String>,
    data: Option<O>,
}

impl<O> ActionState<O> {
    fn idle() -> Self {
        Self {
            phase: ActionPhase::Idle,
            field_errors: None,
            error: None,
            data: None,
        }
    }

    fn begin(&mut self) {
        self.phase = ActionPhase::Pending;
    }

    fn succeed(&mut self, data: O) {
        self.phase = ActionPhase::Succeeded;
        self.field_errors = None;
        self.error = None;
        self.data = Some(data);
    }

    fn fail_validation(&mut self, field_errors: FieldErrors) {
        self.phase = ActionPhase::Failed;
        self.field_errors = Some(field_errors);
        self.error = None;
        self.data = None;
    }

    fn fail(&mut self, message: String) {
        self.phase = ActionPhase::Failed;
        self.field_errors = None;
        self.error = Some(message);
        self.data = None;
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    /// Returns whether an invocation is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == ActionPhase::Pending
    }

    /// Returns the per-field messages of the last validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Returns the message of the last operational failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the payload of the last success.
    #[must_use]
    pub fn data(&self) -> Option<&O> {
        self.data.as_ref()
    }
}

impl<O> Default for ActionState<O> {
    fn default() -> Self {
        Self::idle()
    }
}

type SuccessCallback<O> = Arc<dyn Fn(&O) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;
type CompleteCallback = Arc<dyn Fn() + Send + Sync>;

/// Dispatches a mutation and exposes each invocation's progress as
/// observable state.
///
/// `execute` is non-blocking and reusable indefinitely. Concurrent calls are
/// not deduplicated, nothing is cancellable, and there is no timeout: if the
/// mutation never resolves the state stays pending. Results are applied in
/// the order invocations resolve, not the order they were issued; callers
/// that care serialize their own calls by disabling the trigger while
/// pending, as every shipped controller does.
pub struct ActionRunner<I, O> {
    mutation: Arc<dyn Mutation<Input = I, Output = O>>,
    state: watch::Sender<ActionState<O>>,
    on_success: Option<SuccessCallback<O>>,
    on_error: Option<ErrorCallback>,
    on_complete: Option<CompleteCallback>,
}

impl<I, O> ActionRunner<I, O>
where
    I: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Creates a runner around a mutation, with no callbacks attached.
    #[must_use]
    pub fn new(mutation: Arc<dyn Mutation<Input = I, Output = O>>) -> Self {
        Self {
            mutation,
            state: watch::Sender::new(ActionState::idle()),
            on_success: None,
            on_error: None,
            on_complete: None,
        }
    }

    /// Attaches a callback invoked exactly once per successful resolution.
    #[must_use]
    pub fn on_success(mut self, callback: impl Fn(&O) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Attaches a callback invoked exactly once per operational failure.
    /// Validation failures carry no top-level message and do not trigger it.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Attaches a callback invoked after every resolution.
    #[must_use]
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    /// Starts a new invocation cycle.
    ///
    /// The state flips to pending before this returns, so a view can disable
    /// its trigger immediately. Must be called within a tokio runtime.
    pub fn execute(&self, input: I) {
        self.state.send_modify(ActionState::begin);

        let mutation = Arc::clone(&self.mutation);
        let state = self.state.clone();
        let on_success = self.on_success.clone();
        let on_error = self.on_error.clone();
        let on_complete = self.on_complete.clone();

        tokio::spawn(async move {
            match mutation.run(input).await {
                ActionOutcome::Success(data) => {
                    state.send_modify(|state| state.succeed(data.clone()));
                    if let Some(callback) = on_success.as_deref() {
                        callback(&data);
                    }
                }
                ActionOutcome::Invalid(field_errors) => {
                    state.send_modify(|state| state.fail_validation(field_errors));
                }
                ActionOutcome::Failed(message) => {
                    state.send_modify(|state| state.fail(message.clone()));
                    if let Some(callback) = on_error.as_deref() {
                        callback(message.as_str());
                    }
                }
            }

            if let Some(callback) = on_complete.as_deref() {
                callback();
            }
        });
    }

    /// Returns the current state snapshot.
    #[must_use]
    pub fn state(&self) -> ActionState<O> {
        self.state.borrow().clone()
    }

    /// Subscribes to every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ActionState<O>> {
        self.state.subscribe()
    }

    /// Returns whether an invocation is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Returns the per-field messages of the last validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<FieldErrors> {
        self.state.borrow().field_errors().cloned()
    }

    /// Returns the message of the last operational failure.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(ToOwned::to_owned)
    }

    /// Returns the payload of the last success.
    #[must_use]
    pub fn data(&self) -> Option<O> {
        self.state.borrow().data().cloned()
    }
}
