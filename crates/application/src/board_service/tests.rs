use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use taskboard_core::{ActorIdentity, AppError, AppResult, OrgId};
use taskboard_domain::{AuditLogEntry, Board, BoardId};

use crate::audit_ports::{AuditEvent, AuditLogQuery, AuditRepository};
use crate::billing_ports::{OrgSubscription, PaymentGateway, SubscriptionRepository};
use crate::billing_service::BillingService;
use crate::board_ports::{BoardRepository, CreateBoardInput, OrgLimitRepository, UpdateBoardInput};

use super::{BoardService, MAX_FREE_BOARDS};

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

    async fn save(&self, board: Board) -> AppResult<()> {
        let mut boards = self.boards.lock().await;
        if let Some(stored) = boards.iter_mut().find(|stored| stored.id() == board.id()) {
            *stored = board;
        }
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

    async fn list_for_org(&self, org_id: &OrgId) -> AppResult<Vec<Board>> {
        Ok(self
            .boards
            .lock()
            .await
            .iter()
            .filter(|board| board.org_id() == org_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, org_id: &OrgId, board_id: BoardId) -> AppResult<()> {
        self.boards
            .lock()
            .await
            .retain(|board| !(board.org_id() == org_id && board.id() == board_id));
        Ok(())
    }
}

struct FakeOrgLimitRepository {
    count: Mutex<u32>,
}

impl FakeOrgLimitRepository {
    fn with_count(count: u32) -> Self {
        Self {
            count: Mutex::new(count),
        }
    }
}

#[async_trait]
impl OrgLimitRepository for FakeOrgLimitRepository {
    async fn board_count(&self, _org_id: &OrgId) -> AppResult<u32> {
        Ok(*self.count.lock().await)
    }

    async fn increment(&self, _org_id: &OrgId) -> AppResult<()> {
        *self.count.lock().await += 1;
        Ok(())
    }

    async fn decrement(&self, _org_id: &OrgId) -> AppResult<()> {
        let mut count = self.count.lock().await;
        *count = count.saturating_sub(1);
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

struct StubSubscriptionRepository {
    subscribed: bool,
}

#[async_trait]
impl SubscriptionRepository for StubSubscriptionRepository {
    async fn find_for_org(&self, org_id: &OrgId) -> AppResult<Option<OrgSubscription>> {
        if !self.subscribed {
            return Ok(None);
        }

        Ok(Some(OrgSubscription {
            org_id: org_id.clone(),
            stripe_customer_id: Some("cus_1".to_owned()),
            stripe_subscription_id: Some("sub_1".to_owned()),
            stripe_price_id: Some("price_1".to_owned()),
            stripe_current_period_end: Some(Utc::now() + Duration::days(20)),
        }))
    }
}

struct UnusedPaymentGateway;

#[async_trait]
impl PaymentGateway for UnusedPaymentGateway {
    async fn checkout_session(
        &self,
        _org_id: &OrgId,
        _customer_email: Option<&str>,
        _return_url: &str,
    ) -> AppResult<String> {
        Err(AppError::Internal("not used in this test".to_owned()))
    }

    async fn billing_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> AppResult<String> {
        Err(AppError::Internal("not used in this test".to_owned()))
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
        Some("ada@example.com".to_owned()),
        Some(org()),
    )
}

struct Harness {
    service: BoardService,
    limits: Arc<FakeOrgLimitRepository>,
    audit: Arc<RecordingAuditRepository>,
}

fn harness(board_count: u32, subscribed: bool) -> Harness {
    let limits = Arc::new(FakeOrgLimitRepository::with_count(board_count));
    let audit = Arc::new(RecordingAuditRepository::default());
    let billing = BillingService::new(
        Arc::new(StubSubscriptionRepository { subscribed }),
        Arc::new(UnusedPaymentGateway),
        "https://app.example",
    );
    let service = BoardService::new(
        Arc::new(FakeBoardRepository::default()),
        limits.clone(),
        audit.clone(),
        billing,
    );

    Harness {
        service,
        limits,
        audit,
    }
}

#[tokio::test]
async fn create_appends_a_create_event_attributed_to_the_actor() {
    let harness = harness(0, false);

    let board = harness
        .service
        .create(
            &actor(),
            CreateBoardInput {
                title: "Roadmap".to_owned(),
            },
        )
        .await;
    assert!(board.is_ok());

    let events = harness.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity_title, "Roadmap");
    assert_eq!(events[0].user_name, "Ada");
    assert_eq!(events[0].action.as_str(), "CREATE");
    assert_eq!(events[0].entity_type.as_str(), "BOARD");
}

#[tokio::test]
async fn create_increments_the_free_tier_counter() {
    let harness = harness(2, false);

    let created = harness
        .service
        .create(
            &actor(),
            CreateBoardInput {
                title: "Roadmap".to_owned(),
            },
        )
        .await;
    assert!(created.is_ok());
    assert_eq!(*harness.limits.count.lock().await, 3);
}

#[tokio::test]
async fn create_rejects_the_sixth_free_board() {
    let harness = harness(MAX_FREE_BOARDS, false);

    let result = harness
        .service
        .create(
            &actor(),
            CreateBoardInput {
                title: "One board too many".to_owned(),
            },
        )
        .await;

    match result {
        Err(AppError::Forbidden(message)) => {
            assert!(message.contains("limit of free boards"));
        }
        other => panic!("expected a forbidden error, got {other:?}"),
    }
}

#[tokio::test]
async fn subscribed_organizations_bypass_the_limit_and_the_counter() {
    let harness = harness(MAX_FREE_BOARDS, true);

    let created = harness
        .service
        .create(
            &actor(),
            CreateBoardInput {
                title: "Board six".to_owned(),
            },
        )
        .await;
    assert!(created.is_ok());
    assert_eq!(*harness.limits.count.lock().await, MAX_FREE_BOARDS);
}

#[tokio::test]
async fn delete_releases_a_free_tier_slot_and_appends_a_delete_event() {
    let harness = harness(1, false);

    let Ok(board) = harness
        .service
        .create(
            &actor(),
            CreateBoardInput {
                title: "Short lived".to_owned(),
            },
        )
        .await
    else {
        panic!("board should be created");
    };

    let deleted = harness.service.delete(&actor(), board.id()).await;
    assert!(deleted.is_ok());
    assert_eq!(*harness.limits.count.lock().await, 1);

    let events = harness.audit.events.lock().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].action.as_str(), "DELETE");
    assert_eq!(events[1].entity_title, "Short lived");
}

#[tokio::test]
async fn rename_rejects_short_titles_without_touching_storage() {
    let harness = harness(0, false);

    let result = harness
        .service
        .rename(
            &actor(),
            UpdateBoardInput {
                id: BoardId::new(),
                title: "ab".to_owned(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(harness.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn rename_of_a_missing_board_is_not_found() {
    let harness = harness(0, false);

    let result = harness
        .service
        .rename(
            &actor(),
            UpdateBoardInput {
                id: BoardId::new(),
                title: "Renamed".to_owned(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn operations_require_an_active_organization() {
    let harness = harness(0, false);
    let actor = ActorIdentity::new("user_1", "Ada", "https://img.example/ada.png", None, None);

    let result = harness
        .service
        .create(
            &actor,
            CreateBoardInput {
                title: "No org".to_owned(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}
