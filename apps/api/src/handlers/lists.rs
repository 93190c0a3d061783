use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use taskboard_application::{
    CopyListInput, CreateListInput, DeleteListInput, ListPosition, ReorderListsInput,
    UpdateListInput,
};
use taskboard_core::ActorIdentity;
use taskboard_domain::{BoardId, ListId};
use uuid::Uuid;

use crate::dto::{CreateListRequest, ListResponse, ReorderListsRequest, UpdateListRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_lists_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ListResponse>>> {
    let lists = state
        .list_service
        .list_for_board(&actor, BoardId::from_uuid(board_id))
        .await?
        .into_iter()
        .map(ListResponse::from)
        .collect();

    Ok(Json(lists))
}

pub async fn create_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<CreateListRequest>,
) -> ApiResult<(StatusCode, Json<ListResponse>)> {
    let list = state
        .list_service
        .create(
            &actor,
            CreateListInput {
                board_id: BoardId::from_uuid(board_id),
                title: payload.title,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ListResponse::from(list))))
}

pub async fn update_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateListRequest>,
) -> ApiResult<Json<ListResponse>> {
    let list = state
        .list_service
        .rename(
            &actor,
            UpdateListInput {
                id: ListId::from_uuid(list_id),
                board_id: BoardId::from_uuid(board_id),
                title: payload.title,
            },
        )
        .await?;

    Ok(Json(ListResponse::from(list)))
}

pub async fn delete_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ListResponse>> {
    let list = state
        .list_service
        .delete(
            &actor,
            DeleteListInput {
                id: ListId::from_uuid(list_id),
                board_id: BoardId::from_uuid(board_id),
            },
        )
        .await?;

    Ok(Json(ListResponse::from(list)))
}

pub async fn copy_list_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<ListResponse>)> {
    let list = state
        .list_service
        .copy(
            &actor,
            CopyListInput {
                id: ListId::from_uuid(list_id),
                board_id: BoardId::from_uuid(board_id),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ListResponse::from(list))))
}

pub async fn reorder_lists_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<ReorderListsRequest>,
) -> ApiResult<StatusCode> {
    state
        .list_service
        .reorder(
            &actor,
            ReorderListsInput {
                board_id: BoardId::from_uuid(board_id),
                items: payload
                    .items
                    .into_iter()
                    .map(|item| ListPosition {
                        id: ListId::from_uuid(item.id),
                        position: item.position,
                    })
                    .collect(),
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
