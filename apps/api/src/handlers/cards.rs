use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use taskboard_application::{
    CardPosition, CopyCardInput, CreateCardInput, DeleteCardInput, ReorderCardsInput,
    UpdateCardInput,
};
use taskboard_core::ActorIdentity;
use taskboard_domain::{BoardId, CardId, ListId};
use uuid::Uuid;

use crate::dto::{
    CardResponse, CardWithListResponse, CreateCardRequest, ReorderCardsRequest, UpdateCardRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateCardRequest>,
) -> ApiResult<(StatusCode, Json<CardResponse>)> {
    let card = state
        .card_service
        .create(
            &actor,
            CreateCardInput {
                board_id: BoardId::from_uuid(board_id),
                list_id: ListId::from_uuid(list_id),
                title: payload.title,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(card))))
}

pub async fn get_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(card_id): Path<Uuid>,
) -> ApiResult<Json<CardWithListResponse>> {
    let card = state
        .card_service
        .find_with_list(&actor, CardId::from_uuid(card_id))
        .await?;

    Ok(Json(CardWithListResponse::from(card)))
}

pub async fn update_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateCardRequest>,
) -> ApiResult<Json<CardResponse>> {
    let card = state
        .card_service
        .update(
            &actor,
            UpdateCardInput {
                id: CardId::from_uuid(card_id),
                board_id: BoardId::from_uuid(board_id),
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(CardResponse::from(card)))
}

pub async fn delete_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<CardResponse>> {
    let card = state
        .card_service
        .delete(
            &actor,
            DeleteCardInput {
                id: CardId::from_uuid(card_id),
                board_id: BoardId::from_uuid(board_id),
            },
        )
        .await?;

    Ok(Json(CardResponse::from(card)))
}

pub async fn copy_card_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<CardResponse>)> {
    let card = state
        .card_service
        .copy(
            &actor,
            CopyCardInput {
                id: CardId::from_uuid(card_id),
                board_id: BoardId::from_uuid(board_id),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(card))))
}

pub async fn reorder_cards_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<ReorderCardsRequest>,
) -> ApiResult<StatusCode> {
    state
        .card_service
        .reorder(
            &actor,
            ReorderCardsInput {
                board_id: BoardId::from_uuid(board_id),
                items: payload
                    .items
                    .into_iter()
                    .map(|item| CardPosition {
                        id: CardId::from_uuid(item.id),
                        list_id: ListId::from_uuid(item.list_id),
                        position: item.position,
                    })
                    .collect(),
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
