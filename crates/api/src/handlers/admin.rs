//! Admin view handlers (`/api/v1/admin/design-requests`).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use printquote_core::status::RequestStatus;
use printquote_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::{messages, parse_status, validated};
use crate::middleware::rbac::RequireStaff;
use crate::query::DesignRequestListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{AdminNotesInput, AdminRequestView, AdvanceInput, AmountInput, MessageInput, PageView};

/// GET /api/v1/admin/design-requests?status=&limit=&offset=
pub async fn list_requests(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<DesignRequestListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(params.status.as_deref())?;
    let page = state
        .controller
        .list(&actor, status, params.limit, params.offset)
        .await?;
    let items = page
        .items
        .into_iter()
        .map(AdminRequestView::build)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse {
        data: PageView {
            items,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        },
    }))
}

/// GET /api/v1/admin/design-requests/{id}
///
/// Includes the negotiation ledger and the unread customer message count.
pub async fn get_request(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.controller.get(id, &actor).await?;
    let negotiations = state.controller.ledger(id, &actor).await?;
    let unread = state.thread.unread_count(id, &actor).await?;

    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?.with_detail(unread, negotiations),
    }))
}

/// POST /api/v1/admin/design-requests/{id}/quote
pub async fn submit_quote(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AmountInput>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let request = state
        .controller
        .submit_quote(id, &actor, input.amount, input.note.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?,
    }))
}

/// POST /api/v1/admin/design-requests/{id}/lock
pub async fn lock_price(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.controller.lock_price(id, &actor).await?;
    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?,
    }))
}

/// POST /api/v1/admin/design-requests/{id}/reject
pub async fn reject(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.controller.reject(id, &actor).await?;
    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?,
    }))
}

/// POST /api/v1/admin/design-requests/{id}/advance
pub async fn advance(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdvanceInput>,
) -> AppResult<impl IntoResponse> {
    let next = RequestStatus::from_name(&input.next_status)?;
    let request = state
        .controller
        .advance_fulfillment(id, &actor, next)
        .await?;
    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?,
    }))
}

/// PUT /api/v1/admin/design-requests/{id}/notes
pub async fn update_notes(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdminNotesInput>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let request = state
        .controller
        .update_admin_notes(id, &actor, input.admin_notes.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: AdminRequestView::build(request)?,
    }))
}

/// GET /api/v1/admin/design-requests/{id}/messages
pub async fn list_messages(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    messages::list_thread(&state, &actor, id).await
}

/// POST /api/v1/admin/design-requests/{id}/messages
pub async fn send_message(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MessageInput>,
) -> AppResult<impl IntoResponse> {
    messages::post_message(&state, &actor, id, input).await
}

/// GET /api/v1/admin/design-requests/{id}/payments
pub async fn list_payments(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records = state.payments.history(id, &actor).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/admin/design-requests/{id}/asset-url
pub async fn asset_url(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    messages::signed_asset_url(&state, &actor, id).await
}
