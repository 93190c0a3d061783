use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use taskboard_application::AuditLogQuery;
use taskboard_core::ActorIdentity;
use taskboard_domain::CardId;
use uuid::Uuid;

use crate::dto::{AuditLogEntryResponse, AuditLogQueryParams};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn org_activity_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Query(params): Query<AuditLogQueryParams>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let entries = state
        .audit_log_service
        .list_for_org(
            &actor,
            AuditLogQuery {
                limit: params.limit.unwrap_or(50),
                offset: params.offset.unwrap_or(0),
            },
        )
        .await?
        .into_iter()
        .map(AuditLogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn card_activity_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(card_id): Path<Uuid>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let entries = state
        .audit_log_service
        .list_for_card(&actor, CardId::from_uuid(card_id))
        .await?
        .into_iter()
        .map(AuditLogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
