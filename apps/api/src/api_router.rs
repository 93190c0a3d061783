use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use taskboard_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let allowed_origin = frontend_url
        .parse::<HeaderValue>()
        .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let protected_routes = Router::new()
        .route(
            "/api/boards",
            get(handlers::boards::list_boards_handler).post(handlers::boards::create_board_handler),
        )
        .route(
            "/api/boards/{board_id}",
            get(handlers::boards::get_board_handler)
                .put(handlers::boards::update_board_handler)
                .delete(handlers::boards::delete_board_handler),
        )
        .route(
            "/api/boards/{board_id}/lists",
            get(handlers::lists::list_lists_handler).post(handlers::lists::create_list_handler),
        )
        .route(
            "/api/boards/{board_id}/lists/reorder",
            put(handlers::lists::reorder_lists_handler),
        )
        .route(
            "/api/boards/{board_id}/lists/{list_id}",
            put(handlers::lists::update_list_handler).delete(handlers::lists::delete_list_handler),
        )
        .route(
            "/api/boards/{board_id}/lists/{list_id}/copy",
            post(handlers::lists::copy_list_handler),
        )
        .route(
            "/api/boards/{board_id}/lists/{list_id}/cards",
            post(handlers::cards::create_card_handler),
        )
        .route(
            "/api/boards/{board_id}/cards/reorder",
            put(handlers::cards::reorder_cards_handler),
        )
        .route(
            "/api/boards/{board_id}/cards/{card_id}",
            put(handlers::cards::update_card_handler)
                .delete(handlers::cards::delete_card_handler),
        )
        .route(
            "/api/boards/{board_id}/cards/{card_id}/copy",
            post(handlers::cards::copy_card_handler),
        )
        .route("/api/cards/{card_id}", get(handlers::cards::get_card_handler))
        .route(
            "/api/cards/{card_id}/audit-log",
            get(handlers::audit_log::card_activity_handler),
        )
        .route(
            "/api/audit-log",
            get(handlers::audit_log::org_activity_handler),
        )
        .route(
            "/api/organizations",
            get(handlers::organizations::list_organizations_handler),
        )
        .route(
            "/api/organizations/current",
            get(handlers::organizations::current_organization_handler),
        )
        .route(
            "/api/billing/checkout",
            post(handlers::billing::checkout_handler),
        )
        .route(
            "/api/billing/subscription",
            get(handlers::billing::subscription_handler),
        )
        .layer(from_fn(middleware::require_identity));

    let public_routes =
        Router::new().route("/api/health", get(handlers::health::health_handler));

    Ok(public_routes
        .merge(protected_routes)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
