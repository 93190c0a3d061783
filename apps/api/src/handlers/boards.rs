use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use taskboard_application::{CreateBoardInput, UpdateBoardInput};
use taskboard_core::ActorIdentity;
use taskboard_domain::BoardId;
use uuid::Uuid;

use crate::dto::{BoardResponse, CreateBoardRequest, UpdateBoardRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_boards_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<BoardResponse>>> {
    let boards = state
        .board_service
        .list_for_org(&actor)
        .await?
        .into_iter()
        .map(BoardResponse::from)
        .collect();

    Ok(Json(boards))
}

pub async fn create_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    let board = state
        .board_service
        .create(
            &actor,
            CreateBoardInput {
                title: payload.title,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(BoardResponse::from(board))))
}

pub async fn get_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<BoardResponse>> {
    let board = state
        .board_service
        .find(&actor, BoardId::from_uuid(board_id))
        .await?;

    Ok(Json(BoardResponse::from(board)))
}

pub async fn update_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<UpdateBoardRequest>,
) -> ApiResult<Json<BoardResponse>> {
    let board = state
        .board_service
        .rename(
            &actor,
            UpdateBoardInput {
                id: BoardId::from_uuid(board_id),
                title: payload.title,
            },
        )
        .await?;

    Ok(Json(BoardResponse::from(board)))
}

pub async fn delete_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<BoardResponse>> {
    let board = state
        .board_service
        .delete(&actor, BoardId::from_uuid(board_id))
        .await?;

    Ok(Json(BoardResponse::from(board)))
}
