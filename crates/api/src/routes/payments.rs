use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Public payment routes, nested under `/payments`.
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(payments::payment_webhook))
}
