use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, OrgId};

/// User information resolved by the external identity provider for one
/// request or client session.
///
/// Identity is always injected explicitly; nothing in this codebase performs
/// an ambient lookup. The active organization is optional because a signed-in
/// user may not have selected a workspace yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    user_id: String,
    display_name: String,
    avatar_url: String,
    email: Option<String>,
    org_id: Option<OrgId>,
}

impl ActorIdentity {
    /// Creates an identity snapshot from provider data.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        avatar_url: impl Into<String>,
        email: Option<String>,
        org_id: Option<OrgId>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            avatar_url: avatar_url.into(),
            email,
            org_id,
        }
    }

    /// Returns the stable user id issued by the identity provider.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the avatar image URL for the current user.
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        self.avatar_url.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the active organization, if one is selected.
    #[must_use]
    pub fn org_id(&self) -> Option<&OrgId> {
        self.org_id.as_ref()
    }

    /// Returns the active organization or an authorization error.
    pub fn require_org(&self) -> AppResult<OrgId> {
        self.org_id
            .clone()
            .ok_or_else(|| AppError::Unauthorized("organization context required".to_owned()))
    }
}
