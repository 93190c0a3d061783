use async_trait::async_trait;
use serde::Deserialize;

use taskboard_application::PaymentGateway;
use taskboard_core::{AppError, AppResult, OrgId};

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe-backed implementation of the payment gateway.
///
/// Sessions are created server-side; the client only ever sees the redirect
/// URL that comes back.
pub struct StripeCheckoutGateway {
    http_client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: Option<String>,
}

impl StripeCheckoutGateway {
    /// Creates a gateway using the provider's public API endpoint.
    #[must_use]
    pub fn new(http_client: reqwest::Client, secret_key: impl Into<String>) -> Self {
        Self {
            http_client,
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Overrides the API endpoint, for test doubles.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn create_session(&self, path: &str, form: &[(String, String)]) -> AppResult<String> {
        let response = self
            .http_client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(self.secret_key.as_str())
            .form(form)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to reach payments provider: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "payments provider rejected session creation with status {status}"
            )));
        }

        let session: SessionResponse = response.json().await.map_err(|error| {
            AppError::Internal(format!("failed to parse payments provider response: {error}"))
        })?;

        session.url.ok_or_else(|| {
            AppError::Internal("payments provider returned a session without a URL".to_owned())
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeCheckoutGateway {
    async fn checkout_session(
        &self,
        org_id: &OrgId,
        customer_email: Option<&str>,
        return_url: &str,
    ) -> AppResult<String> {
        tracing::debug!(org_id = %org_id, "creating subscription checkout session");

        let mut form: Vec<(String, String)> = vec![
            ("success_url".to_owned(), return_url.to_owned()),
            ("cancel_url".to_owned(), return_url.to_owned()),
            ("mode".to_owned(), "subscription".to_owned()),
            ("payment_method_types[0]".to_owned(), "card".to_owned()),
            ("billing_address_collection".to_owned(), "auto".to_owned()),
            (
                "line_items[0][price_data][currency]".to_owned(),
                "usd".to_owned(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_owned(),
                "Taskboard Pro".to_owned(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_owned(),
                "Unlimited boards for your organization".to_owned(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_owned(),
                "2000".to_owned(),
            ),
            (
                "line_items[0][price_data][recurring][interval]".to_owned(),
                "month".to_owned(),
            ),
            ("line_items[0][quantity]".to_owned(), "1".to_owned()),
            ("metadata[org_id]".to_owned(), org_id.as_str().to_owned()),
        ];
        if let Some(email) = customer_email {
            form.push(("customer_email".to_owned(), email.to_owned()));
        }

        self.create_session("/v1/checkout/sessions", form.as_slice())
            .await
    }

    async fn billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> AppResult<String> {
        tracing::debug!("creating billing portal session");

        let form = vec![
            ("customer".to_owned(), customer_id.to_owned()),
            ("return_url".to_owned(), return_url.to_owned()),
        ];

        self.create_session("/v1/billing_portal/sessions", form.as_slice())
            .await
    }
}
