pub mod admin;
pub mod customer;
pub mod health;
pub mod payments;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /customer/design-requests...        customer view (role customer)
/// /admin/design-requests...           admin view (role staff or admin)
/// /payments/webhook                   processor callback (public, signed)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customer", customer::router())
        .nest("/admin", admin::router())
        .nest("/payments", payments::router())
}
