use async_trait::async_trait;
use serde::Deserialize;

use taskboard_application::OrganizationDirectory;
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::Organization;

/// HTTP-backed organization directory over the identity provider's
/// management API.
pub struct HttpOrganizationDirectory {
    http_client: reqwest::Client,
    api_base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct OrganizationPayload {
    id: String,
    slug: String,
    name: String,
    image_url: String,
    members_count: u32,
}

impl OrganizationPayload {
    fn into_organization(self) -> AppResult<Organization> {
        Ok(Organization {
            id: OrgId::new(self.id)?,
            slug: self.slug,
            name: self.name,
            image_url: self.image_url,
            members_count: self.members_count,
        })
    }
}

impl HttpOrganizationDirectory {
    /// Creates a directory client for the provider management API.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl OrganizationDirectory for HttpOrganizationDirectory {
    async fn find_organization(&self, org_id: &OrgId) -> AppResult<Option<Organization>> {
        let response = self
            .http_client
            .get(format!("{}/v1/organizations/{org_id}", self.api_base))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to reach identity provider: {error}"))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "identity provider rejected organization lookup with status {status}"
            )));
        }

        let payload: OrganizationPayload = response.json().await.map_err(|error| {
            AppError::Internal(format!("failed to parse identity provider response: {error}"))
        })?;

        payload.into_organization().map(Some)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Organization>> {
        let response = self
            .http_client
            .get(format!("{}/v1/users/{user_id}/organizations", self.api_base))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to reach identity provider: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "identity provider rejected membership lookup with status {status}"
            )));
        }

        let payloads: Vec<OrganizationPayload> = response.json().await.map_err(|error| {
            AppError::Internal(format!("failed to parse identity provider response: {error}"))
        })?;

        payloads
            .into_iter()
            .map(OrganizationPayload::into_organization)
            .collect()
    }
}
