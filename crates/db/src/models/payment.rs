//! Payment records created by the payment gate.

use printquote_core::error::CoreError;
use printquote_core::status::{PaymentStatus, StatusId};
use printquote_core::types::{Amount, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payment_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentRecord {
    pub id: DbId,
    pub design_request_id: DbId,
    pub amount: Amount,
    pub currency: String,
    pub status_id: StatusId,
    pub external_order_id: String,
    pub external_payment_id: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRecord {
    /// Decode the stored status id.
    pub fn status(&self) -> Result<PaymentStatus, CoreError> {
        PaymentStatus::from_id(self.status_id)
    }
}

/// DTO for recording an initiated payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentRecord {
    pub design_request_id: DbId,
    pub amount: Amount,
    pub currency: String,
    pub external_order_id: String,
}
