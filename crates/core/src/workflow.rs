//! Design request price negotiation state machine.
//!
//! The planner is pure: given the current [`PriceState`] of a request, the
//! acting [`Party`] and a [`Command`], it either returns the [`Transition`]
//! to apply or a [`WorkflowError`] explaining why the command is refused.
//! Persistence (the conditional write that makes the transition stick) lives
//! in the `db` crate; this module only decides.
//!
//! ```text
//! pending_review ──quote──▶ quotation_sent ──counter──▶ negotiation_requested
//!       │                        │   ▲                         │
//!     reject               accept/lock  └──────── revise ◀─────┘
//!       ▼                        ▼            (revised_quotation_sent)
//!   rejected              payment_pending ──paid──▶ paid ──▶ in_progress ──▶ completed
//! ```

use crate::roles::Party;
use crate::status::RequestStatus;
use crate::types::Amount;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Workflow failures surfaced to callers. None of them leave partial state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Action '{action}' is not available while the request is {status}")]
    InvalidTransition {
        action: &'static str,
        status: RequestStatus,
    },

    #[error("Price is locked; the quoted and final amounts can no longer change")]
    PriceLocked,

    #[error("Price has not been locked yet")]
    NotLocked,

    #[error("Not permitted to {action}: {reason}")]
    RoleViolation {
        action: &'static str,
        reason: String,
    },

    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Amount),

    #[error("Payment verification failed for reference {reference}")]
    PaymentVerificationFailed { reference: String },

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),
}

// ---------------------------------------------------------------------------
// Commands and state
// ---------------------------------------------------------------------------

/// A negotiation action requested by one of the parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Staff issues a quote, or a revised quote after a counter-offer.
    SubmitQuote { amount: Amount },
    /// Customer proposes a different price.
    CounterOffer { amount: Amount },
    /// Customer accepts the current quote, locking the price.
    AcceptQuote,
    /// Staff locks the current quote (agreed out of band).
    LockPrice,
    /// Staff rejects the request.
    Reject,
    /// Staff moves a paid request through fulfillment.
    AdvanceFulfillment { next: RequestStatus },
}

impl Command {
    /// Short action name used in errors and logs.
    pub fn action(&self) -> &'static str {
        match self {
            Self::SubmitQuote { .. } => "submit_quote",
            Self::CounterOffer { .. } => "counter_offer",
            Self::AcceptQuote => "accept_quote",
            Self::LockPrice => "lock_price",
            Self::Reject => "reject",
            Self::AdvanceFulfillment { .. } => "advance_fulfillment",
        }
    }

    /// The only party allowed to issue this command.
    pub fn required_party(&self) -> Party {
        match self {
            Self::CounterOffer { .. } | Self::AcceptQuote => Party::Customer,
            Self::SubmitQuote { .. }
            | Self::LockPrice
            | Self::Reject
            | Self::AdvanceFulfillment { .. } => Party::Staff,
        }
    }

    /// Whether the command is refused once the price is locked.
    fn requires_unlocked(&self) -> bool {
        !matches!(self, Self::AdvanceFulfillment { .. })
    }

    fn amount(&self) -> Option<Amount> {
        match self {
            Self::SubmitQuote { amount } | Self::CounterOffer { amount } => Some(*amount),
            _ => None,
        }
    }
}

/// The price-relevant projection of a design request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceState {
    pub status: RequestStatus,
    pub quoted_amount: Option<Amount>,
    pub final_amount: Option<Amount>,
    pub price_locked: bool,
}

impl PriceState {
    /// State of a freshly submitted request.
    pub fn initial() -> Self {
        Self {
            status: RequestStatus::PendingReview,
            quoted_amount: None,
            final_amount: None,
            price_locked: false,
        }
    }
}

/// A proposed amount to append to the negotiation ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub party: Party,
    pub amount: Amount,
}

/// The effect of an accepted command.
///
/// `from` is the status the conditional write must still observe; if another
/// actor moved the request in the meantime the write affects no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: &'static str,
    pub from: RequestStatus,
    pub to: RequestStatus,
    /// New `quoted_amount`, when the command sets one.
    pub quoted_amount: Option<Amount>,
    /// New `final_amount`; when present `price_locked` becomes true.
    pub locked_amount: Option<Amount>,
    pub ledger_entry: Option<LedgerEntry>,
}

impl Transition {
    fn status_only(action: &'static str, from: RequestStatus, to: RequestStatus) -> Self {
        Self {
            action,
            from,
            to,
            quoted_amount: None,
            locked_amount: None,
            ledger_entry: None,
        }
    }

    /// Whether the transition writes `quoted_amount` or `final_amount`.
    pub fn touches_price(&self) -> bool {
        self.quoted_amount.is_some() || self.locked_amount.is_some()
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Decide whether `party` may apply `command` to a request in `state`.
///
/// Checks run in a fixed order: role, amount, price lock, status. A locked
/// request therefore answers [`WorkflowError::PriceLocked`] to every price
/// command regardless of which status it has reached.
pub fn plan(
    state: &PriceState,
    party: Party,
    command: &Command,
) -> Result<Transition, WorkflowError> {
    let action = command.action();
    let required = command.required_party();
    if party != required {
        return Err(WorkflowError::RoleViolation {
            action,
            reason: format!("requires the {required} role"),
        });
    }

    if let Some(amount) = command.amount() {
        validate_amount(amount)?;
    }

    if command.requires_unlocked() && state.price_locked {
        return Err(WorkflowError::PriceLocked);
    }

    let invalid = || WorkflowError::InvalidTransition {
        action,
        status: state.status,
    };

    use RequestStatus::*;
    match (*command, state.status) {
        (Command::SubmitQuote { amount }, PendingReview | NegotiationRequested) => {
            let to = if state.status == PendingReview {
                QuotationSent
            } else {
                RevisedQuotationSent
            };
            Ok(Transition {
                action,
                from: state.status,
                to,
                quoted_amount: Some(amount),
                locked_amount: None,
                ledger_entry: Some(LedgerEntry {
                    party: Party::Staff,
                    amount,
                }),
            })
        }
        (Command::CounterOffer { amount }, QuotationSent | RevisedQuotationSent) => {
            Ok(Transition {
                action,
                from: state.status,
                to: NegotiationRequested,
                quoted_amount: None,
                locked_amount: None,
                ledger_entry: Some(LedgerEntry {
                    party: Party::Customer,
                    amount,
                }),
            })
        }
        (Command::AcceptQuote | Command::LockPrice, QuotationSent | RevisedQuotationSent) => {
            let quoted = state.quoted_amount.ok_or_else(invalid)?;
            Ok(Transition {
                action,
                from: state.status,
                to: PaymentPending,
                quoted_amount: None,
                locked_amount: Some(quoted),
                ledger_entry: None,
            })
        }
        (
            Command::Reject,
            PendingReview | QuotationSent | NegotiationRequested | RevisedQuotationSent,
        ) => Ok(Transition::status_only(action, state.status, Rejected)),
        (Command::AdvanceFulfillment { next }, Paid) if next == InProgress => {
            Ok(Transition::status_only(action, Paid, InProgress))
        }
        (Command::AdvanceFulfillment { next }, InProgress) if next == Completed => {
            Ok(Transition::status_only(action, InProgress, Completed))
        }
        _ => Err(invalid()),
    }
}

/// Confirm that a request can be charged, returning the locked amount.
pub fn plan_payment_initiation(state: &PriceState) -> Result<Amount, WorkflowError> {
    let final_amount = match (state.price_locked, state.final_amount) {
        (true, Some(amount)) => amount,
        _ => return Err(WorkflowError::NotLocked),
    };
    if state.status != RequestStatus::PaymentPending {
        return Err(WorkflowError::InvalidTransition {
            action: "initiate_payment",
            status: state.status,
        });
    }
    Ok(final_amount)
}

/// Plan the `payment_pending -> paid` move for a verified payment of `amount`.
///
/// `reference` is the external payment reference, echoed back in the error
/// when the paid amount does not match the locked price.
pub fn plan_payment_confirmation(
    state: &PriceState,
    amount: Amount,
    reference: &str,
) -> Result<Transition, WorkflowError> {
    let final_amount = plan_payment_initiation(state).map_err(|e| match e {
        WorkflowError::InvalidTransition { status, .. } => WorkflowError::InvalidTransition {
            action: "confirm_payment",
            status,
        },
        other => other,
    })?;
    if final_amount != amount {
        return Err(WorkflowError::PaymentVerificationFailed {
            reference: reference.to_string(),
        });
    }
    Ok(Transition::status_only(
        "confirm_payment",
        RequestStatus::PaymentPending,
        RequestStatus::Paid,
    ))
}

/// Apply a planned transition to an in-memory state.
pub fn apply(state: &PriceState, transition: &Transition) -> PriceState {
    let mut next = *state;
    next.status = transition.to;
    if let Some(quoted) = transition.quoted_amount {
        next.quoted_amount = Some(quoted);
    }
    if let Some(locked) = transition.locked_amount {
        next.final_amount = Some(locked);
        next.price_locked = true;
    }
    next
}

/// Reject non-positive amounts.
pub fn validate_amount(amount: Amount) -> Result<(), WorkflowError> {
    if amount > 0 {
        Ok(())
    } else {
        Err(WorkflowError::InvalidAmount(amount))
    }
}

/// Check the record-level invariants of a design request.
///
/// - `final_amount` is present exactly when `price_locked` is set.
/// - A locked `final_amount` equals the `quoted_amount` it locked.
/// - A locked price only exists from `payment_pending` onwards, and an
///   unlocked one never reaches those statuses.
pub fn check_invariants(state: &PriceState) -> Result<(), String> {
    if state.price_locked != state.final_amount.is_some() {
        return Err(format!(
            "price_locked={} but final_amount={:?}",
            state.price_locked, state.final_amount
        ));
    }
    if state.price_locked && state.final_amount != state.quoted_amount {
        return Err(format!(
            "final_amount={:?} differs from quoted_amount={:?}",
            state.final_amount, state.quoted_amount
        ));
    }
    let post_lock = matches!(
        state.status,
        RequestStatus::PaymentPending
            | RequestStatus::Paid
            | RequestStatus::InProgress
            | RequestStatus::Completed
    );
    if post_lock != state.price_locked {
        return Err(format!(
            "status {} inconsistent with price_locked={}",
            state.status, state.price_locked
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
