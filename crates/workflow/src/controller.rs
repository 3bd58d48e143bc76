//! Negotiation controller: the only path by which a design request's status
//! and price fields change.
//!
//! Each operation plans against the row it just read, then applies the plan
//! with a write guarded on that row's status, lock flag and quoted amount. When the guard
//! misses (another actor moved first) the request is re-read and the command
//! re-planned so the caller gets the error matching the state that won.

use printquote_core::error::CoreError;
use printquote_core::roles::Party;
use printquote_core::status::RequestStatus;
use printquote_core::types::{Amount, DbId};
use printquote_core::validation::{
    clamp_limit, clamp_offset, normalize_note, DEFAULT_PAGE_SIZE, MAX_ADMIN_NOTES_LENGTH,
    MAX_PAGE_SIZE,
};
use printquote_core::workflow::{plan, Command, WorkflowError};
use printquote_db::models::design_request::{
    CreateDesignRequest, DesignRequest, DesignRequestFilter,
};
use printquote_db::models::negotiation::NegotiationEntry;
use printquote_db::repositories::{DesignRequestRepo, NegotiationRepo};
use printquote_db::DbPool;
use serde::Serialize;

use crate::actor::{load_request, Actor};
use crate::error::ServiceError;

/// Input for a customer submitting a new print job.
#[derive(Debug, Clone)]
pub struct NewDesignRequest {
    pub asset_key: String,
    pub asset_name: String,
    pub quantity: i32,
    pub size: Option<String>,
}

/// One page of design requests plus the total matching the filter.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPage {
    pub items: Vec<DesignRequest>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Validates and applies negotiation commands.
#[derive(Clone)]
pub struct NegotiationController {
    pool: DbPool,
}

impl NegotiationController {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a request in `pending_review` for the calling customer.
    pub async fn submit_request(
        &self,
        actor: &Actor,
        input: NewDesignRequest,
    ) -> Result<DesignRequest, ServiceError> {
        actor.require(Party::Customer, "submit_request")?;

        let asset_key = input.asset_key.trim();
        let asset_name = input.asset_name.trim();
        if asset_key.is_empty() || asset_name.is_empty() {
            return Err(CoreError::Validation("Asset key and name must not be empty".into()).into());
        }
        if input.quantity < 1 {
            return Err(CoreError::Validation("Quantity must be at least 1".into()).into());
        }
        let size = input
            .size
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let request = DesignRequestRepo::create(
            &self.pool,
            &CreateDesignRequest {
                customer_id: actor.user_id,
                asset_key: asset_key.to_string(),
                asset_name: asset_name.to_string(),
                quantity: input.quantity,
                size,
            },
        )
        .await?;

        tracing::info!(
            design_request_id = request.id,
            user_id = actor.user_id,
            quantity = request.quantity,
            "Design request submitted"
        );
        Ok(request)
    }

    /// Fetch a request the actor may see.
    pub async fn get(&self, id: DbId, actor: &Actor) -> Result<DesignRequest, ServiceError> {
        load_request(&self.pool, id, actor, "view_request").await
    }

    /// List requests, newest first. Customers only ever see their own.
    pub async fn list(
        &self,
        actor: &Actor,
        status: Option<RequestStatus>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<RequestPage, ServiceError> {
        let customer_id = match actor.party {
            Party::Customer => Some(actor.user_id),
            Party::Staff => None,
        };
        let filter = DesignRequestFilter {
            customer_id,
            status_id: status.map(RequestStatus::id),
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            offset: clamp_offset(offset),
        };

        let items = DesignRequestRepo::list(&self.pool, &filter).await?;
        let total = DesignRequestRepo::count(&self.pool, filter.customer_id, filter.status_id).await?;
        Ok(RequestPage {
            items,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }

    /// The negotiation ledger in creation order.
    pub async fn ledger(
        &self,
        id: DbId,
        actor: &Actor,
    ) -> Result<Vec<NegotiationEntry>, ServiceError> {
        load_request(&self.pool, id, actor, "view_ledger").await?;
        Ok(NegotiationRepo::list_for_request(&self.pool, id).await?)
    }

    /// Staff issue a quote (from `pending_review`) or a revision (from
    /// `negotiation_requested`).
    pub async fn submit_quote(
        &self,
        id: DbId,
        actor: &Actor,
        amount: Amount,
        note: Option<&str>,
    ) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::SubmitQuote { amount }, note)
            .await
    }

    /// The customer proposes a different amount.
    pub async fn counter_offer(
        &self,
        id: DbId,
        actor: &Actor,
        amount: Amount,
        note: Option<&str>,
    ) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::CounterOffer { amount }, note)
            .await
    }

    /// The customer accepts the current quote, locking the price.
    pub async fn accept_quote(&self, id: DbId, actor: &Actor) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::AcceptQuote, None).await
    }

    /// Staff lock the current quote on the customer's behalf.
    pub async fn lock_price(&self, id: DbId, actor: &Actor) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::LockPrice, None).await
    }

    pub async fn reject(&self, id: DbId, actor: &Actor) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::Reject, None).await
    }

    /// Move a paid request forward: `paid -> in_progress -> completed`.
    pub async fn advance_fulfillment(
        &self,
        id: DbId,
        actor: &Actor,
        next: RequestStatus,
    ) -> Result<DesignRequest, ServiceError> {
        self.execute(id, actor, Command::AdvanceFulfillment { next }, None)
            .await
    }

    /// Overwrite the staff-only notes. Allowed in every status; last write wins.
    pub async fn update_admin_notes(
        &self,
        id: DbId,
        actor: &Actor,
        admin_notes: Option<&str>,
    ) -> Result<DesignRequest, ServiceError> {
        actor.require(Party::Staff, "update_admin_notes")?;

        let notes = admin_notes.map(str::trim).filter(|n| !n.is_empty());
        if notes.is_some_and(|n| n.chars().count() > MAX_ADMIN_NOTES_LENGTH) {
            return Err(CoreError::Validation(format!(
                "Admin notes must be at most {MAX_ADMIN_NOTES_LENGTH} characters"
            ))
            .into());
        }

        let updated = DesignRequestRepo::update_admin_notes(&self.pool, id, notes)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "DesignRequest",
                id,
            })?;
        tracing::debug!(design_request_id = id, user_id = actor.user_id, "Admin notes updated");
        Ok(updated)
    }

    /// Plan `command` against the current row and apply it conditionally.
    async fn execute(
        &self,
        id: DbId,
        actor: &Actor,
        command: Command,
        note: Option<&str>,
    ) -> Result<DesignRequest, ServiceError> {
        let action = command.action();
        actor.require(command.required_party(), action)?;
        let note = normalize_note(note)?;

        let request = load_request(&self.pool, id, actor, action).await?;
        let state = request.price_state()?;
        let transition = plan(&state, actor.party, &command).inspect_err(|e| {
            log_refusal(id, actor, action, e);
        })?;

        let applied = DesignRequestRepo::apply_transition(
            &self.pool,
            id,
            actor.user_id,
            &transition,
            &state,
            note.as_deref(),
        )
        .await?;

        match applied {
            Some(updated) => {
                tracing::info!(
                    design_request_id = id,
                    user_id = actor.user_id,
                    action,
                    from = %transition.from,
                    to = %transition.to,
                    quoted_amount = ?updated.quoted_amount,
                    final_amount = ?updated.final_amount,
                    "Design request transitioned"
                );
                Ok(updated)
            }
            None => Err(self.classify_lost_race(id, actor, &command).await?.into()),
        }
    }

    /// Explain why a guarded write matched nothing, from the state that won.
    async fn classify_lost_race(
        &self,
        id: DbId,
        actor: &Actor,
        command: &Command,
    ) -> Result<WorkflowError, ServiceError> {
        let action = command.action();
        let current = load_request(&self.pool, id, actor, action).await?;
        let state = current.price_state()?;

        let err = match plan(&state, actor.party, command) {
            Err(e) => e,
            Ok(_) => WorkflowError::InvalidTransition {
                action,
                status: state.status,
            },
        };
        tracing::warn!(
            design_request_id = id,
            user_id = actor.user_id,
            action,
            status = %state.status,
            price_locked = state.price_locked,
            "Concurrent update won the race: {err}"
        );
        Ok(err)
    }
}

fn log_refusal(id: DbId, actor: &Actor, action: &'static str, err: &WorkflowError) {
    match err {
        WorkflowError::PriceLocked | WorkflowError::RoleViolation { .. } => tracing::warn!(
            design_request_id = id,
            user_id = actor.user_id,
            action,
            "Command refused: {err}"
        ),
        _ => tracing::debug!(
            design_request_id = id,
            user_id = actor.user_id,
            action,
            "Command refused: {err}"
        ),
    }
}
