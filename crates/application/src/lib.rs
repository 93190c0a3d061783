//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod audit_ports;
mod billing_ports;
mod billing_service;
mod board_ports;
mod board_service;
mod card_ports;
mod card_service;
mod list_ports;
mod list_service;
mod organization_ports;
mod validation;

pub use audit_log_service::{AuditLogService, ENTITY_ACTIVITY_LIMIT};
pub use audit_ports::{AuditEvent, AuditLogQuery, AuditRepository};
pub use billing_ports::{OrgSubscription, PaymentGateway, SubscriptionRepository};
pub use billing_service::{BillingService, SUBSCRIPTION_GRACE_MS};
pub use board_ports::{BoardRepository, CreateBoardInput, OrgLimitRepository, UpdateBoardInput};
pub use board_service::{BoardService, MAX_FREE_BOARDS};
pub use card_ports::{
    CardPosition, CardRepository, CardWithList, CopyCardInput, CreateCardInput, DeleteCardInput,
    ReorderCardsInput, UpdateCardInput,
};
pub use card_service::CardService;
pub use list_ports::{
    CopyListInput, CreateListInput, DeleteListInput, ListPosition, ListRepository,
    ReorderListsInput, UpdateListInput,
};
pub use list_service::ListService;
pub use organization_ports::OrganizationDirectory;
