use serde::{Deserialize, Serialize};
use taskboard_core::OrgId;

/// A workspace grouping boards, supplied by the external identity provider.
///
/// Read-only from this codebase's perspective: organizations are created and
/// mutated through the provider, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Provider-issued organization identifier.
    pub id: OrgId,
    /// URL-safe handle.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Logo image URL.
    pub image_url: String,
    /// Number of members, for display only.
    pub members_count: u32,
}
