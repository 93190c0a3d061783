use async_trait::async_trait;
use taskboard_core::{AppResult, OrgId};
use taskboard_domain::Organization;

/// Read-only gateway port to the identity provider's organization data.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// Finds one organization by id.
    async fn find_organization(&self, org_id: &OrgId) -> AppResult<Option<Organization>>;

    /// Lists the organizations a user belongs to.
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Organization>>;
}
