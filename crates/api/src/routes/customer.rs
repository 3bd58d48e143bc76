//! Route definitions for the customer view.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Customer routes, nested under `/customer`.
///
/// ```text
/// POST   /design-requests                        submit_request
/// GET    /design-requests                        list_requests
/// GET    /design-requests/{id}                   get_request
/// GET    /design-requests/{id}/negotiations      list_negotiations
/// POST   /design-requests/{id}/counter-offer     counter_offer
/// POST   /design-requests/{id}/accept            accept_quote
/// GET    /design-requests/{id}/messages          list_messages
/// POST   /design-requests/{id}/messages          send_message
/// GET    /design-requests/{id}/asset-url         asset_url
/// POST   /design-requests/{id}/payments          initiate_payment
/// POST   /design-requests/{id}/payments/verify   verify_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/design-requests",
            post(customer::submit_request).get(customer::list_requests),
        )
        .route("/design-requests/{id}", get(customer::get_request))
        .route(
            "/design-requests/{id}/negotiations",
            get(customer::list_negotiations),
        )
        .route(
            "/design-requests/{id}/counter-offer",
            post(customer::counter_offer),
        )
        .route("/design-requests/{id}/accept", post(customer::accept_quote))
        .route(
            "/design-requests/{id}/messages",
            get(customer::list_messages).post(customer::send_message),
        )
        .route("/design-requests/{id}/asset-url", get(customer::asset_url))
        .route(
            "/design-requests/{id}/payments",
            post(customer::initiate_payment),
        )
        .route(
            "/design-requests/{id}/payments/verify",
            post(customer::verify_payment),
        )
}
