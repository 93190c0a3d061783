use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use taskboard_application::{CardPosition, CardRepository, CardWithList};
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::{Card, CardId, ListId};

/// PostgreSQL-backed card repository.
///
/// Organization scoping always joins through `lists` and `boards`.
#[derive(Clone)]
pub struct PostgresCardRepository {
    pool: PgPool,
}

impl PostgresCardRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CardRow {
    id: uuid::Uuid,
    list_id: uuid::Uuid,
    title: String,
    description: Option<String>,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self) -> AppResult<Card> {
        Card::from_parts(
            CardId::from_uuid(self.id),
            ListId::from_uuid(self.list_id),
            self.title,
            self.description,
            self.position,
            self.created_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
struct CardWithListRow {
    id: uuid::Uuid,
    list_id: uuid::Uuid,
    title: String,
    description: Option<String>,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    list_title: String,
}

#[async_trait]
impl CardRepository for PostgresCardRepository {
    async fn create(&self, org_id: &OrgId, card: Card) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (id, list_id, title, description, position,
                created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (
                SELECT 1 FROM lists
                INNER JOIN boards ON boards.id = lists.board_id
                WHERE lists.id = $2 AND boards.org_id = $8
            )
            "#,
        )
        .bind(card.id().as_uuid())
        .bind(card.list_id().as_uuid())
        .bind(card.title())
        .bind(card.description())
        .bind(card.position())
        .bind(card.created_at())
        .bind(card.updated_at())
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create card: {error}")))?;

        Ok(())
    }

    async fn save(&self, org_id: &OrgId, card: Card) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE cards
            SET list_id = $3, title = $4, description = $5, position = $6,
                updated_at = $7
            FROM lists
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE cards.id = $1
                AND cards.list_id = lists.id
                AND boards.org_id = $2
            "#,
        )
        .bind(card.id().as_uuid())
        .bind(org_id.as_str())
        .bind(card.list_id().as_uuid())
        .bind(card.title())
        .bind(card.description())
        .bind(card.position())
        .bind(card.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save card: {error}")))?;

        Ok(())
    }

    async fn find_in_org(&self, org_id: &OrgId, card_id: CardId) -> AppResult<Option<Card>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT cards.id, cards.list_id, cards.title, cards.description,
                cards.position, cards.created_at, cards.updated_at
            FROM cards
            INNER JOIN lists ON lists.id = cards.list_id
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE cards.id = $1 AND boards.org_id = $2
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find card: {error}")))?;

        row.map(CardRow::into_card).transpose()
    }

    async fn find_with_list(
        &self,
        org_id: &OrgId,
        card_id: CardId,
    ) -> AppResult<Option<CardWithList>> {
        let row = sqlx::query_as::<_, CardWithListRow>(
            r#"
            SELECT cards.id, cards.list_id, cards.title, cards.description,
                cards.position, cards.created_at, cards.updated_at,
                lists.title AS list_title
            FROM cards
            INNER JOIN lists ON lists.id = cards.list_id
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE cards.id = $1 AND boards.org_id = $2
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find card: {error}")))?;

        row.map(|row| {
            let list_title = row.list_title.clone();
            let card = CardRow {
                id: row.id,
                list_id: row.list_id,
                title: row.title,
                description: row.description,
                position: row.position,
                created_at: row.created_at,
                updated_at: row.updated_at,
            }
            .into_card()?;

            Ok(CardWithList { card, list_title })
        })
        .transpose()
    }

    async fn list_for_list(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Vec<Card>> {
        let rows = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT cards.id, cards.list_id, cards.title, cards.description,
                cards.position, cards.created_at, cards.updated_at
            FROM cards
            INNER JOIN lists ON lists.id = cards.list_id
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE cards.list_id = $1 AND boards.org_id = $2
            ORDER BY cards.position ASC
            "#,
        )
        .bind(list_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list cards: {error}")))?;

        rows.into_iter().map(CardRow::into_card).collect()
    }

    async fn max_position(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Option<i32>> {
        let position: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MAX(cards.position)
            FROM cards
            INNER JOIN lists ON lists.id = cards.list_id
            INNER JOIN boards ON boards.id = lists.board_id
            WHERE cards.list_id = $1 AND boards.org_id = $2
            "#,
        )
        .bind(list_id.as_uuid())
        .bind(org_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read card positions: {error}")))?;

        Ok(position)
    }

    async fn delete(&self, org_id: &OrgId, card_id: CardId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM cards
            USING lists, boards
            WHERE cards.id = $1
                AND cards.list_id = lists.id
                AND lists.board_id = boards.id
                AND boards.org_id = $2
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(org_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete card: {error}")))?;

        Ok(())
    }

    async fn reorder(&self, org_id: &OrgId, items: &[CardPosition]) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start reorder transaction: {error}"))
        })?;

        for item in items {
            sqlx::query(
                r#"
                UPDATE cards
                SET list_id = $3, position = $4, updated_at = NOW()
                WHERE cards.id = $1
                    AND EXISTS (
                        SELECT 1 FROM lists
                        INNER JOIN boards ON boards.id = lists.board_id
                        WHERE lists.id = $3 AND boards.org_id = $2
                    )
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(org_id.as_str())
            .bind(item.list_id.as_uuid())
            .bind(item.position)
            .execute(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to reorder card: {error}")))?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit reorder transaction: {error}"))
        })?;

        Ok(())
    }
}
