use std::sync::Arc;

use chrono::Utc;
use taskboard_core::{ActorIdentity, AppResult, OrgId};

use crate::billing_ports::{PaymentGateway, SubscriptionRepository};

/// Grace window past the paid period end during which a subscription still
/// counts as active, in milliseconds (one day).
pub const SUBSCRIPTION_GRACE_MS: i64 = 86_400_000;

/// Application service for subscription checks and payment redirects.
#[derive(Clone)]
pub struct BillingService {
    subscriptions: Arc<dyn SubscriptionRepository>,
    payment_gateway: Arc<dyn PaymentGateway>,
    frontend_url: String,
}

impl BillingService {
    /// Creates a billing service.
    #[must_use]
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        payment_gateway: Arc<dyn PaymentGateway>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            subscriptions,
            payment_gateway,
            frontend_url: frontend_url.into(),
        }
    }

    /// Returns whether the actor's active organization has a valid
    /// subscription.
    pub async fn is_subscribed(&self, actor: &ActorIdentity) -> AppResult<bool> {
        let org_id = actor.require_org()?;
        self.is_org_subscribed(&org_id).await
    }

    /// Returns whether an organization has a valid subscription: a price id
    /// is present and the paid period plus the grace window has not ended.
    pub async fn is_org_subscribed(&self, org_id: &OrgId) -> AppResult<bool> {
        let Some(subscription) = self.subscriptions.find_for_org(org_id).await? else {
            return Ok(false);
        };
        let Some(period_end) = subscription.stripe_current_period_end else {
            return Ok(false);
        };

        Ok(subscription.stripe_price_id.is_some()
            && period_end.timestamp_millis() + SUBSCRIPTION_GRACE_MS
                > Utc::now().timestamp_millis())
    }

    /// Creates the payment redirect for the upgrade flow and returns its URL.
    ///
    /// Existing customers are sent to the billing portal; everyone else gets
    /// a fresh subscription checkout session. The provider redirects back to
    /// the organization settings page either way.
    pub async fn checkout_redirect(&self, actor: &ActorIdentity) -> AppResult<String> {
        let org_id = actor.require_org()?;
        let return_url = format!("{}/organization/{org_id}", self.frontend_url);

        let subscription = self.subscriptions.find_for_org(&org_id).await?;
        if let Some(customer_id) =
            subscription.and_then(|subscription| subscription.stripe_customer_id)
        {
            self.payment_gateway
                .billing_portal_session(customer_id.as_str(), return_url.as_str())
                .await
        } else {
            self.payment_gateway
                .checkout_session(&org_id, actor.email(), return_url.as_str())
                .await
        }
    }
}
