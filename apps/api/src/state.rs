use std::sync::Arc;

use taskboard_application::{
    AuditLogService, BillingService, BoardService, CardService, ListService, OrganizationDirectory,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub board_service: BoardService,
    pub list_service: ListService,
    pub card_service: CardService,
    pub audit_log_service: AuditLogService,
    pub billing_service: BillingService,
    pub organization_directory: Arc<dyn OrganizationDirectory>,
}
