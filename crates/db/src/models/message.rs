//! Message thread entries between customer and staff.

use printquote_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `design_request_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub design_request_id: DbId,
    pub sender_role: String,
    pub sender_id: DbId,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for sending a message.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub design_request_id: DbId,
    pub sender_role: String,
    pub sender_id: DbId,
    pub body: String,
}
