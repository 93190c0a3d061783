use std::collections::BTreeMap;
use std::sync::Arc;

use taskboard_core::OrgId;
use tokio::sync::watch;

use crate::organization::{OrganizationContext, OrganizationState};

/// Persistence port for the sidebar's per-organization expansion state,
/// keyed by organization id. Backed by browser local storage in the shell.
pub trait SidebarStateStore: Send + Sync {
    /// Loads the persisted expansion map.
    fn load(&self) -> BTreeMap<String, bool>;

    /// Persists the expansion map.
    fn save(&self, expanded: &BTreeMap<String, bool>);
}

/// Controller for the workspace sidebar's organization accordion.
pub struct SidebarController {
    organizations: Arc<OrganizationContext>,
    storage: Arc<dyn SidebarStateStore>,
    expanded: watch::Sender<BTreeMap<String, bool>>,
}

impl SidebarController {
    /// Creates a controller, restoring expansion state from storage.
    #[must_use]
    pub fn new(organizations: Arc<OrganizationContext>, storage: Arc<dyn SidebarStateStore>) -> Self {
        let expanded = watch::Sender::new(storage.load());
        Self {
            organizations,
            storage,
            expanded,
        }
    }

    /// Returns whether organization data is ready to render; views show a
    /// skeleton until this holds.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.organizations.state().is_loaded
    }

    /// Returns the current organization snapshot.
    #[must_use]
    pub fn organizations(&self) -> OrganizationState {
        self.organizations.state()
    }

    /// Toggles one organization's accordion section and persists the result.
    pub fn toggle(&self, org_id: &OrgId) {
        self.expanded.send_modify(|expanded| {
            let entry = expanded.entry(org_id.as_str().to_owned()).or_insert(false);
            *entry = !*entry;
        });
        self.storage.save(&self.expanded.borrow());
    }

    /// Returns whether one organization's section is expanded.
    #[must_use]
    pub fn is_expanded(&self, org_id: &OrgId) -> bool {
        self.expanded
            .borrow()
            .get(org_id.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Returns the ids of every expanded section, for the accordion's
    /// initial value.
    #[must_use]
    pub fn expanded_ids(&self) -> Vec<String> {
        self.expanded
            .borrow()
            .iter()
            .filter_map(|(org_id, expanded)| expanded.then(|| org_id.clone()))
            .collect()
    }

    /// Subscribes to expansion changes.
    #[must_use]
    pub fn subscribe_expanded(&self) -> watch::Receiver<BTreeMap<String, bool>> {
        self.expanded.subscribe()
    }
}
