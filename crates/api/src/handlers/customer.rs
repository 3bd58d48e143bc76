//! Customer view handlers (`/api/v1/customer/design-requests`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use printquote_core::types::DbId;
use printquote_gateway::PaymentCallback;
use printquote_workflow::NewDesignRequest;

use crate::error::AppResult;
use crate::handlers::{messages, validated};
use crate::middleware::rbac::RequireCustomer;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{
    AmountInput, CustomerRequestView, MessageInput, PageView, SubmitDesignRequestInput,
};

/// POST /api/v1/customer/design-requests
pub async fn submit_request(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Json(input): Json<SubmitDesignRequestInput>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let request = state
        .controller
        .submit_request(
            &actor,
            NewDesignRequest {
                asset_key: input.asset_key,
                asset_name: input.asset_name,
                quantity: input.quantity,
                size: input.size,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CustomerRequestView::build(request)?,
        }),
    ))
}

/// GET /api/v1/customer/design-requests
pub async fn list_requests(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .controller
        .list(&actor, None, params.limit, params.offset)
        .await?;
    let items = page
        .items
        .into_iter()
        .map(CustomerRequestView::build)
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

/// GET /api/v1/customer/design-requests/{id}
pub async fn get_request(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.controller.get(id, &actor).await?;
    Ok(Json(DataResponse {
        data: CustomerRequestView::build(request)?,
    }))
}

/// GET /api/v1/customer/design-requests/{id}/negotiations
pub async fn list_negotiations(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = state.controller.ledger(id, &actor).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/customer/design-requests/{id}/counter-offer
pub async fn counter_offer(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AmountInput>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let request = state
        .controller
        .counter_offer(id, &actor, input.amount, input.note.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: CustomerRequestView::build(request)?,
    }))
}

/// POST /api/v1/customer/design-requests/{id}/accept
pub async fn accept_quote(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = state.controller.accept_quote(id, &actor).await?;
    Ok(Json(DataResponse {
        data: CustomerRequestView::build(request)?,
    }))
}

/// GET /api/v1/customer/design-requests/{id}/messages
pub async fn list_messages(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    messages::list_thread(&state, &actor, id).await
}

/// POST /api/v1/customer/design-requests/{id}/messages
pub async fn send_message(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MessageInput>,
) -> AppResult<impl IntoResponse> {
    messages::post_message(&state, &actor, id, input).await
}

/// GET /api/v1/customer/design-requests/{id}/asset-url
pub async fn asset_url(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    messages::signed_asset_url(&state, &actor, id).await
}

/// POST /api/v1/customer/design-requests/{id}/payments
///
/// Opens a processor session for the locked amount.
pub async fn initiate_payment(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state.payments.initiate_payment(id, &actor).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// POST /api/v1/customer/design-requests/{id}/payments/verify
pub async fn verify_payment(
    RequireCustomer(actor): RequireCustomer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(callback): Json<PaymentCallback>,
) -> AppResult<impl IntoResponse> {
    let request = state.payments.verify_payment(id, &actor, &callback).await?;
    Ok(Json(DataResponse {
        data: CustomerRequestView::build(request)?,
    }))
}
