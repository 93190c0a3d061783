use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskboard_application::{OrgSubscription, SubscriptionRepository};
use taskboard_core::{AppResult, OrgId};

/// In-memory subscription repository implementation.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<HashMap<OrgId, OrgSubscription>>,
}

impl InMemorySubscriptionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces an organization's subscription record.
    pub async fn upsert(&self, subscription: OrgSubscription) {
        self.subscriptions
            .write()
            .await
            .insert(subscription.org_id.clone(), subscription);
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_for_org(&self, org_id: &OrgId) -> AppResult<Option<OrgSubscription>> {
        Ok(self.subscriptions.read().await.get(org_id).cloned())
    }
}
