//! Taskboard API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use taskboard_application::{
    AuditLogService, BillingService, BoardService, CardService, ListService,
};
use taskboard_core::AppError;
use taskboard_infrastructure::{
    HttpOrganizationDirectory, PostgresAuditRepository, PostgresBoardRepository,
    PostgresCardRepository, PostgresListRepository, PostgresOrgLimitRepository,
    PostgresSubscriptionRepository, StripeCheckoutGateway,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api_config::ApiConfig;
use crate::api_router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(config.database_url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("migrations applied, exiting");
        return Ok(());
    }

    let http_client = reqwest::Client::new();

    let board_repository = Arc::new(PostgresBoardRepository::new(pool.clone()));
    let list_repository = Arc::new(PostgresListRepository::new(pool.clone()));
    let card_repository = Arc::new(PostgresCardRepository::new(pool.clone()));
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));
    let limit_repository = Arc::new(PostgresOrgLimitRepository::new(pool.clone()));
    let subscription_repository = Arc::new(PostgresSubscriptionRepository::new(pool.clone()));

    let payment_gateway = Arc::new(StripeCheckoutGateway::new(
        http_client.clone(),
        config.stripe_secret_key.clone(),
    ));
    let organization_directory = Arc::new(HttpOrganizationDirectory::new(
        http_client,
        config.identity_api_url.clone(),
        config.identity_api_key.clone(),
    ));

    let billing_service = BillingService::new(
        subscription_repository,
        payment_gateway,
        config.frontend_url.clone(),
    );
    let board_service = BoardService::new(
        board_repository.clone(),
        limit_repository,
        audit_repository.clone(),
        billing_service.clone(),
    );
    let list_service = ListService::new(
        list_repository.clone(),
        board_repository,
        card_repository.clone(),
        audit_repository.clone(),
    );
    let card_service = CardService::new(card_repository, list_repository, audit_repository.clone());
    let audit_log_service = AuditLogService::new(audit_repository);

    let state = AppState {
        board_service,
        list_service,
        card_service,
        audit_log_service,
        billing_service,
        organization_directory,
    };

    let router = build_router(state, config.frontend_url.as_str())?;

    let address = SocketAddr::new(config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "taskboard api listening");
    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
