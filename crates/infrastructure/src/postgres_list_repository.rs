use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use taskboard_application::{ListPosition, ListRepository};
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::{BoardId, Card, List, ListId};

/// PostgreSQL-backed list repository.
///
/// Every query scopes through the owning board's `org_id` so a list is only
/// ever visible inside its organization.
#[derive(Clone)]
pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ListRow {
    id: uuid::Uuid,
    board_id: uuid::Uuid,
    title: String,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListRow {
    fn into_list(self) -> AppResult<List> {
        List::from_parts(
            ListId::from_uuid(self.id),
            BoardId::from_uuid(self.board_id),
            self.title,
            self.position,
            self.created_at,
            self.updated_at,
        )
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn create(&self, org_id: &OrgId, list: List) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS (SELECT 1 FROM boards WHERE id = $2 AND org_id = $7)
            "#,
        )
        .bind(list.id().as_uuid())
        .bind(list.board_id().as_uuid())
        .bind(list.title())
        .bind(list.position())
        .bind(list.created_at())
        .bind(list.updated_at())
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create list: {error}")))?;

        Ok(())
    }

    async fn save(&self, org_id: &OrgId, list: List) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE lists
            SET title = $3, position = $4, updated_at = $5
            FROM boards
            WHERE lists.id = $1
                AND lists.board_id = boards.id
                AND boards.org_id = $2
            "#,
        )
        .bind(list.id().as_uuid())
        .bind(org_id.as_str())
        .bind(list.title())
        .bind(list.position())
        .bind(list.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save list: {error}")))?;

        Ok(())
    }

    async fn find(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        list_id: ListId,
    ) -> AppResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT lists.id, lists.board_id, lists.title, lists.position,
                lists.created_at, lists.updated_at
            FROM lists
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE lists.id = $1 AND lists.board_id = $2 AND boards.org_id = $3
            "#,
        )
        .bind(list_id.as_uuid())
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find list: {error}")))?;

        row.map(ListRow::into_list).transpose()
    }

    async fn list_for_board(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Vec<List>> {
        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT lists.id, lists.board_id, lists.title, lists.position,
                lists.created_at, lists.updated_at
            FROM lists
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE lists.board_id = $1 AND boards.org_id = $2
            ORDER BY lists.position ASC
            "#,
        )
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list lists: {error}")))?;

        rows.into_iter().map(ListRow::into_list).collect()
    }

    async fn max_position(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<i32>> {
        let position: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MAX(lists.position)
            FROM lists
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE lists.board_id = $1 AND boards.org_id = $2
            "#,
        )
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read list positions: {error}")))?;

        Ok(position)
    }

    async fn delete(&self, org_id: &OrgId, board_id: BoardId, list_id: ListId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM lists
            USING boards
            WHERE lists.id = $1
                AND lists.board_id = $2
                AND lists.board_id = boards.id
                AND boards.org_id = $3
            "#,
        )
        .bind(list_id.as_uuid())
        .bind(board_id.as_uuid())
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete list: {error}")))?;

        Ok(())
    }

    async fn insert_copy(&self, org_id: &OrgId, list: List, cards: Vec<Card>) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start list copy transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS (SELECT 1 FROM boards WHERE id = $2 AND org_id = $7)
            "#,
        )
        .bind(list.id().as_uuid())
        .bind(list.board_id().as_uuid())
        .bind(list.title())
        .bind(list.position())
        .bind(list.created_at())
        .bind(list.updated_at())
        .bind(org_id.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to copy list: {error}")))?;

        for card in cards {
            sqlx::query(
                r#"
                INSERT INTO cards (id, list_id, title, description, position,
                    created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(card.id().as_uuid())
            .bind(card.list_id().as_uuid())
            .bind(card.title())
            .bind(card.description())
            .bind(card.position())
            .bind(card.created_at())
            .bind(card.updated_at())
            .execute(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to copy card: {error}")))?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit list copy transaction: {error}"))
        })?;

        Ok(())
    }

    async fn reorder(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        items: &[ListPosition],
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start reorder transaction: {error}"))
        })?;

        for item in items {
            sqlx::query(
                r#"
                UPDATE lists
                SET position = $4, updated_at = NOW()
                FROM boards
                WHERE lists.id = $1
                    AND lists.board_id = $2
                    AND lists.board_id = boards.id
                    AND boards.org_id = $3
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(board_id.as_uuid())
            .bind(org_id.as_str())
            .bind(item.position)
            .execute(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to reorder list: {error}")))?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit reorder transaction: {error}"))
        })?;

        Ok(())
    }
}
