//! Payment processor webhook.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use printquote_core::types::DbId;
use printquote_gateway::PaymentCallback;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub design_request_id: DbId,
    pub status: &'static str,
}

/// POST /api/v1/payments/webhook
///
/// Unauthenticated: trust comes from the callback signature alone. Safe to
/// redeliver; a settled payment acknowledges again without side effects.
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(callback): Json<PaymentCallback>,
) -> AppResult<impl IntoResponse> {
    let request = state.payments.verify_webhook(&callback).await?;
    Ok(Json(DataResponse {
        data: WebhookAck {
            design_request_id: request.id,
            status: request.status()?.name(),
        },
    }))
}
