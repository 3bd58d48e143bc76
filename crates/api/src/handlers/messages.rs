//! Thread and asset handlers shared by both views.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use printquote_core::types::DbId;
use printquote_workflow::Actor;

use crate::error::AppResult;
use crate::handlers::validated;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{AssetUrlView, MessageInput};

/// The thread in creation order; the other party's messages become read.
pub(crate) async fn list_thread(
    state: &AppState,
    actor: &Actor,
    id: DbId,
) -> AppResult<impl IntoResponse> {
    let messages = state.thread.list(id, actor).await?;
    Ok(Json(DataResponse { data: messages }))
}

pub(crate) async fn post_message(
    state: &AppState,
    actor: &Actor,
    id: DbId,
    input: MessageInput,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let message = state.thread.send(id, actor, &input.text).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

pub(crate) async fn signed_asset_url(
    state: &AppState,
    actor: &Actor,
    id: DbId,
) -> AppResult<impl IntoResponse> {
    let url = state.assets.asset_url(id, actor).await?;
    Ok(Json(DataResponse {
        data: AssetUrlView {
            url,
            expires_in_secs: state.config.asset_url_ttl_secs,
        },
    }))
}
