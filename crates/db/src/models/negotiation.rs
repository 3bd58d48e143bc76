//! Negotiation ledger entries (append-only).

use printquote_core::types::{Amount, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `negotiation_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NegotiationEntry {
    pub id: DbId,
    pub design_request_id: DbId,
    pub sender_role: String,
    pub sender_id: DbId,
    pub amount: Amount,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a ledger entry.
#[derive(Debug, Clone)]
pub struct CreateNegotiationEntry {
    pub design_request_id: DbId,
    pub sender_role: String,
    pub sender_id: DbId,
    pub amount: Amount,
    pub note: Option<String>,
}
