use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskboard_application::{
    BoardRepository, CardPosition, CardRepository, CardWithList, ListPosition, ListRepository,
    OrgLimitRepository,
};
use taskboard_core::{AppError, AppResult, OrgId};
use taskboard_domain::{Board, BoardId, Card, CardId, List, ListId};

/// In-memory implementation of the board, list, card, and org-limit
/// repositories, sharing one store so cascades behave like the relational
/// schema.
#[derive(Debug, Default)]
pub struct InMemoryWorkspaceRepository {
    boards: RwLock<HashMap<BoardId, Board>>,
    lists: RwLock<HashMap<ListId, (OrgId, List)>>,
    cards: RwLock<HashMap<CardId, (OrgId, Card)>>,
    limits: RwLock<HashMap<OrgId, u32>>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepository for InMemoryWorkspaceRepository {
    async fn create(&self, board: Board) -> AppResult<()> {
        let mut boards = self.boards.write().await;
        if boards.contains_key(&board.id()) {
            return Err(AppError::Conflict(format!(
                "board '{}' already exists",
                board.id()
            )));
        }

        boards.insert(board.id(), board);
        Ok(())
    }

    async fn save(&self, board: Board) -> AppResult<()> {
        self.boards.write().await.insert(board.id(), board);
        Ok(())
    }

    async fn find(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<Board>> {
        Ok(self
            .boards
            .read()
            .await
            .get(&board_id)
            .filter(|board| board.org_id() == org_id)
            .cloned())
    }

    async fn list_for_org(&self, org_id: &OrgId) -> AppResult<Vec<Board>> {
        let boards = self.boards.read().await;
        let mut values: Vec<Board> = boards
            .values()
            .filter(|board| board.org_id() == org_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(values)
    }

    async fn delete(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<()> {
        let removed = {
            let mut boards = self.boards.write().await;
            boards
                .get(&board_id)
                .filter(|board| board.org_id() == org_id)
                .is_some()
                .then(|| boards.remove(&board_id))
                .flatten()
        };

        if removed.is_some() {
            let orphaned: Vec<ListId> = {
                let mut lists = self.lists.write().await;
                let orphaned = lists
                    .values()
                    .filter(|(_, list)| list.board_id() == board_id)
                    .map(|(_, list)| list.id())
                    .collect::<Vec<_>>();
                lists.retain(|_, (_, list)| list.board_id() != board_id);
                orphaned
            };

            self.cards
                .write()
                .await
                .retain(|_, (_, card)| !orphaned.contains(&card.list_id()));
        }

        Ok(())
    }
}

#[async_trait]
impl ListRepository for InMemoryWorkspaceRepository {
    async fn create(&self, org_id: &OrgId, list: List) -> AppResult<()> {
        self.lists
            .write()
            .await
            .insert(list.id(), (org_id.clone(), list));
        Ok(())
    }

    async fn save(&self, org_id: &OrgId, list: List) -> AppResult<()> {
        self.lists
            .write()
            .await
            .insert(list.id(), (org_id.clone(), list));
        Ok(())
    }

    async fn find(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        list_id: ListId,
    ) -> AppResult<Option<List>> {
        Ok(self
            .lists
            .read()
            .await
            .get(&list_id)
            .filter(|(stored_org_id, list)| {
                stored_org_id == org_id && list.board_id() == board_id
            })
            .map(|(_, list)| list.clone()))
    }

    async fn list_for_board(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Vec<List>> {
        let lists = self.lists.read().await;
        let mut values: Vec<List> = lists
            .values()
            .filter(|(stored_org_id, list)| {
                stored_org_id == org_id && list.board_id() == board_id
            })
            .map(|(_, list)| list.clone())
            .collect();
        values.sort_by_key(List::position);

        Ok(values)
    }

    async fn max_position(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<i32>> {
        Ok(self
            .lists
            .read()
            .await
            .values()
            .filter(|(stored_org_id, list)| {
                stored_org_id == org_id && list.board_id() == board_id
            })
            .map(|(_, list)| list.position())
            .max())
    }

    async fn delete(&self, org_id: &OrgId, board_id: BoardId, list_id: ListId) -> AppResult<()> {
        let removed = {
            let mut lists = self.lists.write().await;
            lists
                .get(&list_id)
                .filter(|(stored_org_id, list)| {
                    stored_org_id == org_id && list.board_id() == board_id
                })
                .is_some()
                .then(|| lists.remove(&list_id))
                .flatten()
        };

        if removed.is_some() {
            self.cards
                .write()
                .await
                .retain(|_, (_, card)| card.list_id() != list_id);
        }

        Ok(())
    }

    async fn insert_copy(&self, org_id: &OrgId, list: List, cards: Vec<Card>) -> AppResult<()> {
        self.lists
            .write()
            .await
            .insert(list.id(), (org_id.clone(), list));

        let mut stored_cards = self.cards.write().await;
        for card in cards {
            stored_cards.insert(card.id(), (org_id.clone(), card));
        }

        Ok(())
    }

    async fn reorder(
        &self,
        org_id: &OrgId,
        board_id: BoardId,
        items: &[ListPosition],
    ) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        for item in items {
            if let Some((stored_org_id, list)) = lists.get_mut(&item.id) {
                if stored_org_id == org_id && list.board_id() == board_id {
                    list.set_position(item.position);
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CardRepository for InMemoryWorkspaceRepository {
    async fn create(&self, org_id: &OrgId, card: Card) -> AppResult<()> {
        self.cards
            .write()
            .await
            .insert(card.id(), (org_id.clone(), card));
        Ok(())
    }

    async fn save(&self, org_id: &OrgId, card: Card) -> AppResult<()> {
        self.cards
            .write()
            .await
            .insert(card.id(), (org_id.clone(), card));
        Ok(())
    }

    async fn find_in_org(&self, org_id: &OrgId, card_id: CardId) -> AppResult<Option<Card>> {
        Ok(self
            .cards
            .read()
            .await
            .get(&card_id)
            .filter(|(stored_org_id, _)| stored_org_id == org_id)
            .map(|(_, card)| card.clone()))
    }

    async fn find_with_list(
        &self,
        org_id: &OrgId,
        card_id: CardId,
    ) -> AppResult<Option<CardWithList>> {
        let Some(card) = self.find_in_org(org_id, card_id).await? else {
            return Ok(None);
        };

        let list_title = self
            .lists
            .read()
            .await
            .get(&card.list_id())
            .map(|(_, list)| list.title().to_owned())
            .ok_or_else(|| AppError::Internal("card references a missing list".to_owned()))?;

        Ok(Some(CardWithList { card, list_title }))
    }

    async fn list_for_list(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Vec<Card>> {
        let cards = self.cards.read().await;
        let mut values: Vec<Card> = cards
            .values()
            .filter(|(stored_org_id, card)| stored_org_id == org_id && card.list_id() == list_id)
            .map(|(_, card)| card.clone())
            .collect();
        values.sort_by_key(Card::position);

        Ok(values)
    }

    async fn max_position(&self, org_id: &OrgId, list_id: ListId) -> AppResult<Option<i32>> {
        Ok(self
            .cards
            .read()
            .await
            .values()
            .filter(|(stored_org_id, card)| stored_org_id == org_id && card.list_id() == list_id)
            .map(|(_, card)| card.position())
            .max())
    }

    async fn delete(&self, org_id: &OrgId, card_id: CardId) -> AppResult<()> {
        self.cards
            .write()
            .await
            .retain(|stored_card_id, (stored_org_id, _)| {
                !(stored_card_id == &card_id && stored_org_id == org_id)
            });
        Ok(())
    }

    async fn reorder(&self, org_id: &OrgId, items: &[CardPosition]) -> AppResult<()> {
        let mut cards = self.cards.write().await;
        for item in items {
            if let Some((stored_org_id, card)) = cards.get_mut(&item.id) {
                if stored_org_id == org_id {
                    card.relocate(item.list_id, item.position);
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OrgLimitRepository for InMemoryWorkspaceRepository {
    async fn board_count(&self, org_id: &OrgId) -> AppResult<u32> {
        Ok(self.limits.read().await.get(org_id).copied().unwrap_or(0))
    }

    async fn increment(&self, org_id: &OrgId) -> AppResult<()> {
        *self.limits.write().await.entry(org_id.clone()).or_insert(0) += 1;
        Ok(())
    }

    async fn decrement(&self, org_id: &OrgId) -> AppResult<()> {
        let mut limits = self.limits.write().await;
        let count = limits.entry(org_id.clone()).or_insert(0);
        *count = count.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taskboard_application::{BoardRepository, CardRepository, ListRepository};
    use taskboard_core::OrgId;
    use taskboard_domain::{Board, Card, List};

    use super::InMemoryWorkspaceRepository;

    fn org() -> OrgId {
        OrgId::new("org_1").unwrap_or_else(|_| panic!("valid org id"))
    }

    #[tokio::test]
    async fn deleting_a_board_cascades_to_lists_and_cards() {
        let repository = InMemoryWorkspaceRepository::new();

        let Ok(board) = Board::new(org(), "Roadmap") else {
            panic!("board should build");
        };
        let Ok(list) = List::new(board.id(), "To do", 1) else {
            panic!("list should build");
        };
        let Ok(card) = Card::new(list.id(), "Fix bug", 1) else {
            panic!("card should build");
        };

        let board_id = board.id();
        let list_id = list.id();
        let card_id = card.id();

        assert!(BoardRepository::create(&repository, board).await.is_ok());
        assert!(ListRepository::create(&repository, &org(), list).await.is_ok());
        assert!(CardRepository::create(&repository, &org(), card).await.is_ok());

        let deleted = BoardRepository::delete(&repository, &org(), board_id).await;
        assert!(deleted.is_ok());

        let found_list = ListRepository::find(&repository, &org(), board_id, list_id).await;
        assert_eq!(found_list.ok().flatten(), None);
        let found_card = repository.find_in_org(&org(), card_id).await;
        assert_eq!(found_card.ok().flatten(), None);
    }

    #[tokio::test]
    async fn boards_from_other_organizations_are_invisible() {
        let repository = InMemoryWorkspaceRepository::new();
        let Ok(other_org) = OrgId::new("org_2") else {
            panic!("valid org id");
        };

        let Ok(board) = Board::new(org(), "Roadmap") else {
            panic!("board should build");
        };
        let board_id = board.id();
        assert!(BoardRepository::create(&repository, board).await.is_ok());

        let cross_org = BoardRepository::find(&repository, &other_org, board_id).await;
        assert_eq!(cross_org.ok().flatten(), None);
    }
}
