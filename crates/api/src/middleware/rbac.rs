//! Role extractors for the two presentation adapters.
//!
//! Each extractor wraps [`AuthUser`] and refuses callers on the wrong side
//! of the negotiation with `ROLE_VIOLATION`, so a handler under
//! `/customer` or `/admin` receives an [`Actor`] of the right party.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use printquote_core::roles::Party;
use printquote_workflow::Actor;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `customer` role.
///
/// ```ignore
/// async fn mine(RequireCustomer(actor): RequireCustomer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCustomer(pub Actor);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireCustomer(admit(&user, Party::Customer, "use_customer_view")?))
    }
}

/// Requires `staff` or `admin`.
pub struct RequireStaff(pub Actor);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireStaff(admit(&user, Party::Staff, "use_admin_view")?))
    }
}

/// The user's actor, if their role acts on the `required` side.
fn admit(user: &AuthUser, required: Party, action: &'static str) -> Result<Actor, AppError> {
    let actor = user.actor();
    actor.require(required, action).inspect_err(|_| {
        tracing::warn!(user_id = user.user_id, role = %user.role, action, "View refused for role");
    })?;
    Ok(actor)
}
