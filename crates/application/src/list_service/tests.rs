use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use taskboard_core::{ActorIdentity, AppError, AppResult, OrgId};
use taskboard_domain::{AuditLogEntry, Board, BoardId, Card, CardId, List, ListId};

use crate::audit_ports::{AuditEvent, AuditLogQuery, AuditRepository};
use crate::board_ports::BoardRepository;
use crate::card_ports::{CardPosition, CardRepository, CardWithList};
use crate::list_ports::{
    CopyListInput, CreateListInput, DeleteListInput, ListPosition, ListRepository,
    ReorderListsInput, UpdateListInput,
};

use super::ListService;

#[derive(Default)]
struct FakeListRepository {
    lists: Mutex<Vec<List>>,
    reorders: Mutex<Vec<Vec<ListPosition>>>,
    copied_card_batches: Mutex<Vec<Vec<Card>>>,
}

#[async_trait]
impl ListRepository for FakeListRepository {
    async fn create(&self, _org_id: &OrgId, list: List) -> AppResult<()> {
        self.lists.lock().await.push(list);
        Ok(())
    }

    async fn save(&self, _org_id: &OrgId, list: List) -> AppResult<()> {
        let mut lists = self.lists.lock().await;
        if let Some(stored) = lists.iter_mut().find(|stored| stored.id() == list.id()) {
            *stored = list;
        }
        Ok(())
    }

    async fn find(
        &self,
        _org_id: &OrgId,
        board_id: BoardId,
        list_id: ListId,
    ) -> AppResult<Option<List>> {
        Ok(self
            .lists
            .lock()
            .await
            .iter()
            .find(|list| list.board_id() == board_id && list.id() == list_id)
            .cloned())
    }

    async fn list_for_board(&self, _org_id: &OrgId, board_id: BoardId) -> AppResult<Vec<List>> {
        let mut lists: Vec<List> = self
            .lists
            .lock()
            .await
            .iter()
            .filter(|list| list.board_id() == board_id)
            .cloned()
            .collect();
        lists.sort_by_key(List::position);
        Ok(lists)
    }

    async fn max_position(&self, _org_id: &OrgId, board_id: BoardId) -> AppResult<Option<i32>> {
        Ok(self
            .lists
            .lock()
            .await
            .iter()
            .filter(|list| list.board_id() == board_id)
            .map(List::position)
            .max())
    }

    async fn delete(&self, _org_id: &OrgId, board_id: BoardId, list_id: ListId) -> AppResult<()> {
        self.lists
            .lock()
            .await
            .retain(|list| !(list.board_id() == board_id && list.id() == list_id));
        Ok(())
    }

    async fn insert_copy(&self, _org_id: &OrgId, list: List, cards: Vec<Card>) -> AppResult<()> {
        self.lists.lock().await.push(list);
        self.copied_card_batches.lock().await.push(cards);
        Ok(())
    }

    async fn reorder(
        &self,
        _org_id: &OrgId,
        _board_id: BoardId,
        items: &[ListPosition],
    ) -> AppResult<()> {
        self.reorders.lock().await.push(items.to_vec());
        Ok(())
    }
}

#[derive(Default)]
struct FakeBoardRepository {
    boards: Mutex<Vec<Board>>,
}

#[async_trait]
impl BoardRepository for FakeBoardRepository {
    async fn create(&self, board: Board) -> AppResult<()> {
        self.boards.lock().await.push(board);
        Ok(())
    }

    async fn save(&self, _board: Board) -> AppResult<()> {
        Ok(())
    }

    async fn find(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<Option<Board>> {
        Ok(self
            .boards
            .lock()
            .await
            .iter()
            .find(|board| board.org_id() == org_id && board.id() == board_id)
            .cloned())
    }

    async fn list_for_org(&self, _org_id: &OrgId) -> AppResult<Vec<Board>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _org_id: &OrgId, _board_id: BoardId) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct FakeCardRepository {
    cards: Mutex<Vec<Card>>,
}

#[async_trait]
impl CardRepository for FakeCardRepository {
    async fn create(&self, _org_id: &OrgId, card: Card) -> AppResult<()> {
        self.cards.lock().await.push(card);
        Ok(())
    }

    async fn save(&self, _org_id: &OrgId, _card: Card) -> AppResult<()> {
        Ok(())
    }

    async fn find_in_org(&self, _org_id: &OrgId, _card_id: CardId) -> AppResult<Option<Card>> {
        Ok(None)
    }

    async fn find_with_list(
        &self,
        _org_id: &OrgId,
        _card_id: CardId,
    ) -> AppResult<Option<CardWithList>> {
        Ok(None)
    }

    async fn list_for_list(&self, _org_id: &OrgId, list_id: ListId) -> AppResult<Vec<Card>> {
        Ok(self
            .cards
            .lock()
            .await
            .iter()
            .filter(|card| card.list_id() == list_id)
            .cloned()
            .collect())
    }

    async fn max_position(&self, _org_id: &OrgId, _list_id: ListId) -> AppResult<Option<i32>> {
        Ok(None)
    }

    async fn delete(&self, _org_id: &OrgId, _card_id: CardId) -> AppResult<()> {
        Ok(())
    }

    async fn reorder(&self, _org_id: &OrgId, _items: &[CardPosition]) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for RecordingAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn list_recent(
        &self,
        _org_id: &OrgId,
        _query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        Ok(Vec::new())
    }

    async fn list_for_entity(
        &self,
        _org_id: &OrgId,
        _entity_id: &str,
        _limit: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        Ok(Vec::new())
    }
}

fn org() -> OrgId {
    OrgId::new("org_1").unwrap_or_else(|_| panic!("valid org id"))
}

fn actor() -> ActorIdentity {
    ActorIdentity::new(
        "user_1",
        "Ada",
        "https://img.example/ada.png",
        None,
        Some(org()),
    )
}

struct Harness {
    service: ListService,
    lists: Arc<FakeListRepository>,
    cards: Arc<FakeCardRepository>,
    audit: Arc<RecordingAuditRepository>,
    board_id: BoardId,
}

async fn harness() -> Harness {
    let lists = Arc::new(FakeListRepository::default());
    let boards = Arc::new(FakeBoardRepository::default());
    let cards = Arc::new(FakeCardRepository::default());
    let audit = Arc::new(RecordingAuditRepository::default());

    let Ok(board) = Board::new(org(), "Roadmap") else {
        panic!("board should build");
    };
    let board_id = board.id();
    let created = boards.create(board).await;
    assert!(created.is_ok());

    Harness {
        service: ListService::new(lists.clone(), boards, cards.clone(), audit.clone()),
        lists,
        cards,
        audit,
        board_id,
    }
}

#[tokio::test]
async fn create_places_the_first_list_at_position_one() {
    let harness = harness().await;

    let list = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "To do".to_owned(),
            },
        )
        .await;

    match list {
        Ok(list) => assert_eq!(list.position(), 1),
        Err(error) => panic!("create failed: {error}"),
    }
}

#[tokio::test]
async fn create_appends_after_the_last_list() {
    let harness = harness().await;

    for title in ["To do", "Doing"] {
        let created = harness
            .service
            .create(
                &actor(),
                CreateListInput {
                    board_id: harness.board_id,
                    title: title.to_owned(),
                },
            )
            .await;
        assert!(created.is_ok());
    }

    let list = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "Done".to_owned(),
            },
        )
        .await;

    match list {
        Ok(list) => assert_eq!(list.position(), 3),
        Err(error) => panic!("create failed: {error}"),
    }
}

#[tokio::test]
async fn create_requires_an_existing_board() {
    let harness = harness().await;

    let result = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: BoardId::new(),
                title: "Orphan".to_owned(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn copy_suffixes_the_title_and_clones_the_cards() {
    let harness = harness().await;

    let Ok(source) = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "To do".to_owned(),
            },
        )
        .await
    else {
        panic!("source list should be created");
    };

    for (title, position) in [("Fix bug", 1), ("Write docs", 2)] {
        let Ok(card) = Card::new(source.id(), title, position) else {
            panic!("card should build");
        };
        let created = harness.cards.create(&org(), card).await;
        assert!(created.is_ok());
    }

    let copy = harness
        .service
        .copy(
            &actor(),
            CopyListInput {
                id: source.id(),
                board_id: harness.board_id,
            },
        )
        .await;

    match copy {
        Ok(copy) => {
            assert_eq!(copy.title(), "To do - Copy");
            assert_eq!(copy.position(), 2);
        }
        Err(error) => panic!("copy failed: {error}"),
    }

    let batches = harness.lists.copied_card_batches.lock().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[0][0].title(), "Fix bug");

    let events = harness.audit.events.lock().await;
    assert_eq!(events.last().map(|event| event.action.as_str()), Some("CREATE"));
    assert_eq!(
        events.last().map(|event| event.entity_title.as_str()),
        Some("To do - Copy")
    );
}

#[tokio::test]
async fn delete_returns_the_list_and_appends_a_delete_event() {
    let harness = harness().await;

    let Ok(list) = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "Ephemeral".to_owned(),
            },
        )
        .await
    else {
        panic!("list should be created");
    };

    let deleted = harness
        .service
        .delete(
            &actor(),
            DeleteListInput {
                id: list.id(),
                board_id: harness.board_id,
            },
        )
        .await;

    match deleted {
        Ok(deleted) => assert_eq!(deleted.title(), "Ephemeral"),
        Err(error) => panic!("delete failed: {error}"),
    }

    let events = harness.audit.events.lock().await;
    assert_eq!(events.last().map(|event| event.action.as_str()), Some("DELETE"));
}

#[tokio::test]
async fn rename_persists_and_appends_an_update_event() {
    let harness = harness().await;

    let Ok(list) = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "To do".to_owned(),
            },
        )
        .await
    else {
        panic!("list should be created");
    };

    let renamed = harness
        .service
        .rename(
            &actor(),
            UpdateListInput {
                id: list.id(),
                board_id: harness.board_id,
                title: "Backlog".to_owned(),
            },
        )
        .await;
    assert!(renamed.is_ok());

    let stored = harness
        .service
        .list_for_board(&actor(), harness.board_id)
        .await;
    match stored {
        Ok(stored) => assert_eq!(stored[0].title(), "Backlog"),
        Err(error) => panic!("listing failed: {error}"),
    }

    let events = harness.audit.events.lock().await;
    assert_eq!(events.last().map(|event| event.action.as_str()), Some("UPDATE"));
}

#[tokio::test]
async fn reorder_applies_positions_without_audit_events() {
    let harness = harness().await;

    let Ok(list) = harness
        .service
        .create(
            &actor(),
            CreateListInput {
                board_id: harness.board_id,
                title: "To do".to_owned(),
            },
        )
        .await
    else {
        panic!("list should be created");
    };
    let events_before = harness.audit.events.lock().await.len();

    let reordered = harness
        .service
        .reorder(
            &actor(),
            ReorderListsInput {
                board_id: harness.board_id,
                items: vec![ListPosition {
                    id: list.id(),
                    position: 5,
                }],
            },
        )
        .await;
    assert!(reordered.is_ok());

    assert_eq!(harness.lists.reorders.lock().await.len(), 1);
    assert_eq!(harness.audit.events.lock().await.len(), events_before);
}

#[tokio::test]
async fn reorder_rejects_an_empty_item_set() {
    let harness = harness().await;

    let result = harness
        .service
        .reorder(
            &actor(),
            ReorderListsInput {
                board_id: harness.board_id,
                items: Vec::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}
