//! Client-side interaction layer, decoupled from any rendering mechanism.
//!
//! Every mutating view goes through the same contract: a [`Mutation`]
//! resolves to exactly one [`ActionOutcome`], an [`ActionRunner`] tracks the
//! invocation as observable [`ActionState`], and controllers translate
//! resolutions into notifications, navigation, and their own view state.

#![forbid(unsafe_code)]

mod action;
mod card_actions;
mod list_form;
mod modal;
mod organization;
mod ports;
mod pro_modal;
mod sidebar;

pub use action::{ActionOutcome, ActionPhase, ActionRunner, ActionState, Mutation};
pub use card_actions::CardActionsController;
pub use list_form::ListFormController;
pub use modal::ModalHandle;
pub use organization::{OrganizationContext, OrganizationState};
pub use ports::{Navigator, Notifier};
pub use pro_modal::ProModalController;
pub use sidebar::{SidebarController, SidebarStateStore};
