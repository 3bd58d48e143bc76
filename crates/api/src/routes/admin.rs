//! Route definitions for the admin view.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Staff routes, nested under `/admin`.
///
/// ```text
/// GET    /design-requests                   list_requests (?status, limit, offset)
/// GET    /design-requests/{id}              get_request
/// POST   /design-requests/{id}/quote        submit_quote
/// POST   /design-requests/{id}/lock         lock_price
/// POST   /design-requests/{id}/reject       reject
/// POST   /design-requests/{id}/advance      advance
/// PUT    /design-requests/{id}/notes        update_notes
/// GET    /design-requests/{id}/messages     list_messages
/// POST   /design-requests/{id}/messages     send_message
/// GET    /design-requests/{id}/payments     list_payments
/// GET    /design-requests/{id}/asset-url    asset_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/design-requests", get(admin::list_requests))
        .route("/design-requests/{id}", get(admin::get_request))
        .route("/design-requests/{id}/quote", post(admin::submit_quote))
        .route("/design-requests/{id}/lock", post(admin::lock_price))
        .route("/design-requests/{id}/reject", post(admin::reject))
        .route("/design-requests/{id}/advance", post(admin::advance))
        .route("/design-requests/{id}/notes", put(admin::update_notes))
        .route(
            "/design-requests/{id}/messages",
            get(admin::list_messages).post(admin::send_message),
        )
        .route("/design-requests/{id}/payments", get(admin::list_payments))
        .route("/design-requests/{id}/asset-url", get(admin::asset_url))
}
