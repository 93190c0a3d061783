//! Infrastructure adapters for application and client ports.

#![forbid(unsafe_code)]

mod http_organization_directory;
mod in_memory_audit_repository;
mod in_memory_organization_directory;
mod in_memory_subscription_repository;
mod in_memory_workspace_repository;
mod postgres_audit_repository;
mod postgres_board_repository;
mod postgres_card_repository;
mod postgres_list_repository;
mod postgres_org_limit_repository;
mod postgres_subscription_repository;
mod service_mutations;
mod stripe_checkout_gateway;

pub use http_organization_directory::HttpOrganizationDirectory;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_organization_directory::InMemoryOrganizationDirectory;
pub use in_memory_subscription_repository::InMemorySubscriptionRepository;
pub use in_memory_workspace_repository::InMemoryWorkspaceRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_board_repository::PostgresBoardRepository;
pub use postgres_card_repository::PostgresCardRepository;
pub use postgres_list_repository::PostgresListRepository;
pub use postgres_org_limit_repository::PostgresOrgLimitRepository;
pub use postgres_subscription_repository::PostgresSubscriptionRepository;
pub use service_mutations::{
    CheckoutRedirectMutation, CopyCardMutation, CreateListMutation, DeleteCardMutation,
};
pub use stripe_checkout_gateway::StripeCheckoutGateway;
