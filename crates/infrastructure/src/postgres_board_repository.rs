use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use taskboard_application::BoardRepository;
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::{Board, BoardId};

/// PostgreSQL-backed board repository.
#[derive(Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BoardRow {
    id: uuid::Uuid,
    org_id: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BoardRow {
    fn into_board(self) -> AppResult<Board> {
        Board::from_parts(
            BoardId::from_uuid(self.id),
            OrgId::new(self.org_id)?,
            self.title,
            self.created_at,
            self.updated_at,
        )
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn create(&self, board: Board) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, org_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(board.id().as_uuid())
        .bind(board.org_id().as_str())
        .bind(board.title())
        .bind(board.created_at())
        .bind(board.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create board: {error}")))?;

        Ok(())
    }

    async fn save(&self, board: Board) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE boards
            SET title = $3, updated_at = $4
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(board.id().as_uuid())
        .bind(board.org_id().as_str())
        .bind(board.title())
        .bind(board.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save board: {error}")))?;

        Ok(())
    }

    async fn find(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT id, org_id, title, created_at, updated_at
            FROM boards
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find board: {error}")))?;

        row.map(BoardRow::into_board).transpose()
    }

    async fn list_for_org(&self, org_id: &OrgId) -> AppResult<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT id, org_id, title, created_at, updated_at
            FROM boards
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list boards: {error}")))?;

        rows.into_iter().map(BoardRow::into_board).collect()
    }

    async fn delete(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM boards
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete board: {error}")))?;

        Ok(())
    }
}
