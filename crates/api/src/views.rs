//! Read projections for the customer and admin views, plus the JSON inputs
//! each view accepts.
//!
//! Projections hold no authority: handlers build them from the row the
//! controller just returned, so clients always render post-write state.

use printquote_core::roles::Party;
use printquote_core::status::RequestStatus;
use printquote_core::types::{Amount, DbId, Timestamp};
use printquote_core::workflow::{plan, plan_payment_initiation, Command, PriceState};
use printquote_db::models::design_request::DesignRequest;
use printquote_db::models::negotiation::NegotiationEntry;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Available actions
// ---------------------------------------------------------------------------

/// Action name offered once the price is locked and payment can start.
pub const ACTION_PAY: &str = "initiate_payment";

/// Actions `party` could take on a request in `state` right now.
///
/// Clients use this to enable or disable controls; the controller still
/// re-checks every call against the stored row.
pub fn available_actions(state: &PriceState, party: Party) -> Vec<&'static str> {
    let probes = [
        Command::SubmitQuote { amount: 1 },
        Command::CounterOffer { amount: 1 },
        Command::AcceptQuote,
        Command::LockPrice,
        Command::Reject,
        Command::AdvanceFulfillment {
            next: RequestStatus::InProgress,
        },
        Command::AdvanceFulfillment {
            next: RequestStatus::Completed,
        },
    ];

    let mut actions: Vec<&'static str> = probes
        .iter()
        .filter(|command| plan(state, party, command).is_ok())
        .map(Command::action)
        .collect();
    actions.dedup();

    if party == Party::Customer && plan_payment_initiation(state).is_ok() {
        actions.push(ACTION_PAY);
    }
    actions
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// What a customer sees of their own request. Staff notes are never included.
#[derive(Debug, Serialize)]
pub struct CustomerRequestView {
    pub id: DbId,
    pub asset_name: String,
    pub quantity: i32,
    pub size: Option<String>,
    pub status: &'static str,
    pub quoted_amount: Option<Amount>,
    pub final_amount: Option<Amount>,
    pub price_locked: bool,
    pub price_locked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub available_actions: Vec<&'static str>,
}

impl CustomerRequestView {
    pub fn build(request: DesignRequest) -> AppResult<Self> {
        let state = request.price_state()?;
        Ok(Self {
            id: request.id,
            asset_name: request.asset_name,
            quantity: request.quantity,
            size: request.size,
            status: state.status.name(),
            quoted_amount: request.quoted_amount,
            final_amount: request.final_amount,
            price_locked: request.price_locked,
            price_locked_at: request.price_locked_at,
            created_at: request.created_at,
            updated_at: request.updated_at,
            available_actions: available_actions(&state, Party::Customer),
        })
    }
}

/// The staff view of a request, including notes and negotiation history.
#[derive(Debug, Serialize)]
pub struct AdminRequestView {
    pub id: DbId,
    pub customer_id: DbId,
    pub asset_key: String,
    pub asset_name: String,
    pub quantity: i32,
    pub size: Option<String>,
    pub status: &'static str,
    pub quoted_amount: Option<Amount>,
    pub final_amount: Option<Amount>,
    pub price_locked: bool,
    pub price_locked_at: Option<Timestamp>,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub available_actions: Vec<&'static str>,
    /// Unread customer messages; only present on single-request fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_messages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiations: Option<Vec<NegotiationEntry>>,
}

impl AdminRequestView {
    pub fn build(request: DesignRequest) -> AppResult<Self> {
        let state = request.price_state()?;
        Ok(Self {
            id: request.id,
            customer_id: request.customer_id,
            asset_key: request.asset_key,
            asset_name: request.asset_name,
            quantity: request.quantity,
            size: request.size,
            status: state.status.name(),
            quoted_amount: request.quoted_amount,
            final_amount: request.final_amount,
            price_locked: request.price_locked,
            price_locked_at: request.price_locked_at,
            admin_notes: request.admin_notes,
            created_at: request.created_at,
            updated_at: request.updated_at,
            available_actions: available_actions(&state, Party::Staff),
            unread_messages: None,
            negotiations: None,
        })
    }

    /// Attach the detail-only fields.
    pub fn with_detail(mut self, unread: i64, negotiations: Vec<NegotiationEntry>) -> Self {
        self.unread_messages = Some(unread);
        self.negotiations = Some(negotiations);
        self
    }
}

/// A page of projected requests.
#[derive(Debug, Serialize)]
pub struct PageView<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// POST /customer/design-requests
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitDesignRequestInput {
    #[validate(length(min = 1, max = 512))]
    pub asset_key: String,
    #[validate(length(min = 1, max = 255))]
    pub asset_name: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = 100))]
    pub size: Option<String>,
}

/// Quote or counter-offer body.
#[derive(Debug, Deserialize, Validate)]
pub struct AmountInput {
    #[validate(range(min = 1))]
    pub amount: Amount,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

/// POST /admin/design-requests/{id}/advance
#[derive(Debug, Deserialize)]
pub struct AdvanceInput {
    /// Target status name: `in_progress` or `completed`.
    pub next_status: String,
}

/// PUT /admin/design-requests/{id}/notes
#[derive(Debug, Deserialize, Validate)]
pub struct AdminNotesInput {
    #[validate(length(max = 10000))]
    pub admin_notes: Option<String>,
}

/// POST .../messages
#[derive(Debug, Deserialize, Validate)]
pub struct MessageInput {
    #[validate(length(min = 1, max = 4000))]
    pub text: String,
}

/// Signed URL response.
#[derive(Debug, Serialize)]
pub struct AssetUrlView {
    pub url: String,
    pub expires_in_secs: u64,
}
