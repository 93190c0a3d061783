use axum::Json;
use axum::extract::{Extension, State};
use taskboard_core::ActorIdentity;

use crate::dto::{CheckoutResponse, SubscriptionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn checkout_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<CheckoutResponse>> {
    let url = state.billing_service.checkout_redirect(&actor).await?;
    Ok(Json(CheckoutResponse { url }))
}

pub async fn subscription_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let is_subscribed = state.billing_service.is_subscribed(&actor).await?;
    Ok(Json(SubscriptionResponse { is_subscribed }))
}
