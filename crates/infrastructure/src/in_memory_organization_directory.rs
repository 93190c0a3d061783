use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskboard_application::OrganizationDirectory;
use taskboard_core::{AppResult, OrgId};
use taskboard_domain::Organization;

/// In-memory organization directory implementation, seeded by tests and
/// development wiring.
#[derive(Debug, Default)]
pub struct InMemoryOrganizationDirectory {
    organizations: RwLock<HashMap<OrgId, Organization>>,
    memberships: RwLock<HashMap<String, Vec<OrgId>>>,
}

impl InMemoryOrganizationDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization.
    pub async fn insert_organization(&self, organization: Organization) {
        self.organizations
            .write()
            .await
            .insert(organization.id.clone(), organization);
    }

    /// Adds a user to an organization's membership.
    pub async fn add_membership(&self, user_id: impl Into<String>, org_id: OrgId) {
        self.memberships
            .write()
            .await
            .entry(user_id.into())
            .or_default()
            .push(org_id);
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryOrganizationDirectory {
    async fn find_organization(&self, org_id: &OrgId) -> AppResult<Option<Organization>> {
        Ok(self.organizations.read().await.get(org_id).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Organization>> {
        let memberships = self.memberships.read().await;
        let organizations = self.organizations.read().await;

        Ok(memberships
            .get(user_id)
            .into_iter()
            .flatten()
            .filter_map(|org_id| organizations.get(org_id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use taskboard_client::OrganizationContext;
    use taskboard_core::{ActorIdentity, OrgId};
    use taskboard_domain::Organization;

    use super::InMemoryOrganizationDirectory;

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: OrgId::new(id).unwrap_or_else(|_| panic!("valid org id")),
            slug: name.to_ascii_lowercase(),
            name: name.to_owned(),
            image_url: format!("https://img.example/{id}.png"),
            members_count: 3,
        }
    }

    #[tokio::test]
    async fn backs_the_client_organization_context() {
        let directory = Arc::new(InMemoryOrganizationDirectory::new());
        directory.insert_organization(org("org_1", "Acme")).await;
        directory.insert_organization(org("org_2", "Blue")).await;
        for id in ["org_1", "org_2"] {
            let Ok(org_id) = OrgId::new(id) else {
                panic!("valid org id");
            };
            directory.add_membership("user_1", org_id).await;
        }

        let context = OrganizationContext::new(directory);
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
        assert_eq!(state.memberships.len(), 2);
    }
}
