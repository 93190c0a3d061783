use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_application::CardWithList;
use taskboard_domain::{AuditLogEntry, Board, Card, List, Organization};
use uuid::Uuid;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for board creation.
#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
}

/// Incoming payload for board renames.
#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: String,
}

/// API representation of a board.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub org_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Board> for BoardResponse {
    fn from(board: Board) -> Self {
        Self {
            id: board.id().as_uuid(),
            org_id: board.org_id().as_str().to_owned(),
            title: board.title().to_owned(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
        }
    }
}

/// Incoming payload for list creation.
#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

/// Incoming payload for list renames.
#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub title: String,
}

/// One list's target position in a bulk reorder request.
#[derive(Debug, Deserialize)]
pub struct ListPositionRequest {
    pub id: Uuid,
    pub position: i32,
}

/// Incoming payload for bulk list reordering.
#[derive(Debug, Deserialize)]
pub struct ReorderListsRequest {
    pub items: Vec<ListPositionRequest>,
}

/// API representation of a list.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<List> for ListResponse {
    fn from(list: List) -> Self {
        Self {
            id: list.id().as_uuid(),
            board_id: list.board_id().as_uuid(),
            title: list.title().to_owned(),
            position: list.position(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

/// Incoming payload for card creation.
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub title: String,
}

/// Incoming payload for card edits; unset fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// One card's target list and position in a bulk reorder request.
#[derive(Debug, Deserialize)]
pub struct CardPositionRequest {
    pub id: Uuid,
    pub list_id: Uuid,
    pub position: i32,
}

/// Incoming payload for bulk card reordering.
#[derive(Debug, Deserialize)]
pub struct ReorderCardsRequest {
    pub items: Vec<CardPositionRequest>,
}

/// API representation of a card.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id().as_uuid(),
            list_id: card.list_id().as_uuid(),
            title: card.title().to_owned(),
            description: card.description().map(ToOwned::to_owned),
            position: card.position(),
            created_at: card.created_at(),
            updated_at: card.updated_at(),
        }
    }
}

/// API representation of a card joined with its parent list title.
#[derive(Debug, Serialize)]
pub struct CardWithListResponse {
    pub card: CardResponse,
    pub list_title: String,
}

impl From<CardWithList> for CardWithListResponse {
    fn from(value: CardWithList) -> Self {
        Self {
            card: CardResponse::from(value.card),
            list_title: value.list_title,
        }
    }
}

/// API representation of one audit trail entry, with the derived sentence.
#[derive(Debug, Serialize)]
pub struct AuditLogEntryResponse {
    pub id: Uuid,
    pub action: String,
    pub entity_id: String,
    pub entity_type: String,
    pub entity_title: String,
    pub user_id: String,
    pub user_name: String,
    pub user_image: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(entry: AuditLogEntry) -> Self {
        let message = entry.message();
        Self {
            id: entry.id,
            action: entry.action,
            entity_id: entry.entity_id,
            entity_type: entry.entity_type,
            entity_title: entry.entity_title,
            user_id: entry.user_id,
            user_name: entry.user_name,
            user_image: entry.user_image,
            message,
            created_at: entry.created_at,
        }
    }
}

/// API representation of an organization from the identity provider.
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub members_count: u32,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id.as_str().to_owned(),
            slug: organization.slug,
            name: organization.name,
            image_url: organization.image_url,
            members_count: organization.members_count,
        }
    }
}

/// Payment redirect payload.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Subscription status payload.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub is_subscribed: bool,
}

/// Query parameters for the organization activity feed.
#[derive(Debug, Deserialize)]
pub struct AuditLogQueryParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
