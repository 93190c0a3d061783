use std::sync::Arc;

use taskboard_application::OrganizationDirectory;
use taskboard_core::{ActorIdentity, AppResult};
use taskboard_domain::Organization;
use tokio::sync::watch;

/// Snapshot of the identity provider's organization data for the current
/// user.
///
/// `is_loaded` stays false until the first refresh completes; consumers must
/// check it before rendering anything organization-dependent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationState {
    /// The active organization, once selected and resolved.
    pub current: Option<Organization>,
    /// Every organization the user belongs to.
    pub memberships: Vec<Organization>,
    /// Whether provider data has been loaded at least once.
    pub is_loaded: bool,
}

/// Read-only organization context injected into controllers.
pub struct OrganizationContext {
    directory: Arc<dyn OrganizationDirectory>,
    state: watch::Sender<OrganizationState>,
}

impl OrganizationContext {
    /// Creates an unloaded context over a provider directory.
    #[must_use]
    pub fn new(directory: Arc<dyn OrganizationDirectory>) -> Self {
        Self {
            directory,
            state: watch::Sender::new(OrganizationState::default()),
        }
    }

    /// Reloads the active organization and membership list for the actor.
    pub async fn refresh(&self, actor: &ActorIdentity) -> AppResult<()> {
        let current = match actor.org_id() {
            Some(org_id) => self.directory.find_organization(org_id).await?,
            None => None,
        };
        let memberships = self.directory.list_for_user(actor.user_id()).await?;

        self.state.send_replace(OrganizationState {
            current,
            memberships,
            is_loaded: true,
        });

        Ok(())
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn state(&self) -> OrganizationState {
        self.state.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OrganizationState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use taskboard_application::OrganizationDirectory;
    use taskboard_core::{ActorIdentity, AppResult, OrgId};
    use taskboard_domain::Organization;

    use super::OrganizationContext;

    struct FakeDirectory {
        organizations: Vec<Organization>,
    }

    #[async_trait]
    impl OrganizationDirectory for FakeDirectory {
        async fn find_organization(&self, org_id: &OrgId) -> AppResult<Option<Organization>> {
            Ok(self
                .organizations
                .iter()
                .find(|organization| &organization.id == org_id)
                .cloned())
        }

        async fn list_for_user(&self, _user_id: &str) -> AppResult<Vec<Organization>> {
            Ok(self.organizations.clone())
        }
    }

    fn organization(id: &str, name: &str) -> Organization {
        Organization {
            id: OrgId::new(id).unwrap_or_else(|_| panic!("valid org id")),
            slug: name.to_ascii_lowercase(),
            name: name.to_owned(),
            image_url: format!("https://img.example/{id}.png"),
            members_count: 4,
        }
    }

    #[tokio::test]
    async fn starts_unloaded_until_the_first_refresh() {
        let context = OrganizationContext::new(Arc::new(FakeDirectory {
            organizations: vec![organization("org_1", "Acme")],
        }));
        assert!(!context.state().is_loaded);

        let actor = ActorIdentity::new(
            "user_1",
            "Ada",
            "https://img.example/ada.png",
            None,
            OrgId::new("org_1").ok(),
        );
        let refreshed = context.refresh(&actor).await;
        assert!(refreshed.is_ok());

        let state = context.state();
        assert!(state.is_loaded);
        assert_eq!(
            state.current.map(|organization| organization.name),
            Some("Acme".to_owned())
        );
        assert_eq!(state.memberships.len(), 1);
    }

    #[tokio::test]
    async fn actor_without_an_active_org_loads_memberships_only() {
        let context = OrganizationContext::new(Arc::new(FakeDirectory {
            organizations: vec![organization("org_1", "Acme"), organization("org_2", "Blue")],
        }));

        let actor = ActorIdentity::new("user_1", "Ada", "https://img.example/ada.png", None, None);
        let refreshed = context.refresh(&actor).await;
        assert!(refreshed.is_ok());

        let state = context.state();
        assert!(state.is_loaded);
        assert!(state.current.is_none());
        assert_eq!(state.memberships.len(), 2);
    }
}
