use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskboard_core::{AppResult, OrgId};

/// Billing state for an organization, mirrored from the payments provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgSubscription {
    /// Organization the subscription belongs to.
    pub org_id: OrgId,
    /// Payments-provider customer id, once checkout completed.
    pub stripe_customer_id: Option<String>,
    /// Payments-provider subscription id.
    pub stripe_subscription_id: Option<String>,
    /// Purchased price id; absent until a plan is active.
    pub stripe_price_id: Option<String>,
    /// End of the paid period; the subscription stays valid for a grace
    /// window past this instant.
    pub stripe_current_period_end: Option<DateTime<Utc>>,
}

/// Repository port for mirrored subscription state.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Finds the subscription record for an organization.
    async fn find_for_org(&self, org_id: &OrgId) -> AppResult<Option<OrgSubscription>>;
}

/// Gateway port to the external payments provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a subscription checkout session and returns its redirect URL.
    async fn checkout_session(
        &self,
        org_id: &OrgId,
        customer_email: Option<&str>,
        return_url: &str,
    ) -> AppResult<String>;

    /// Creates a billing-portal session for an existing customer and returns
    /// its redirect URL.
    async fn billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> AppResult<String>;
}
