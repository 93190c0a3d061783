use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use taskboard_application::{OrgSubscription, SubscriptionRepository};
use taskboard_core::{AppError, AppResult, OrgId};

/// PostgreSQL-backed store for mirrored subscription state.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRow {
    org_id: String,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    stripe_price_id: Option<String>,
    stripe_current_period_end: Option<DateTime<Utc>>,
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_for_org(&self, org_id: &OrgId) -> AppResult<Option<OrgSubscription>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT org_id, stripe_customer_id, stripe_subscription_id,
                stripe_price_id, stripe_current_period_end
            FROM org_subscriptions
            WHERE org_id = $1
            "#,
        )
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find subscription: {error}")))?;

        row.map(|row| {
            Ok(OrgSubscription {
                org_id: OrgId::new(row.org_id)?,
                stripe_customer_id: row.stripe_customer_id,
                stripe_subscription_id: row.stripe_subscription_id,
                stripe_price_id: row.stripe_price_id,
                stripe_current_period_end: row.stripe_current_period_end,
            })
        })
        .transpose()
    }
}
