use axum::Json;
use axum::extract::{Extension, State};
use taskboard_core::{ActorIdentity, AppError};

use crate::dto::OrganizationResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_organizations_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<OrganizationResponse>>> {
    let organizations = state
        .organization_directory
        .list_for_user(actor.user_id())
        .await?
        .into_iter()
        .map(OrganizationResponse::from)
        .collect();

    Ok(Json(organizations))
}

pub async fn current_organization_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<OrganizationResponse>> {
    let org_id = actor.require_org()?;
    let organization = state
        .organization_directory
        .find_organization(&org_id)
        .await?
        .ok_or_else(|| AppError::NotFound("organization not found".to_owned()))?;

    Ok(Json(OrganizationResponse::from(organization)))
}
