//! Design request model (one row per custom print job).

use printquote_core::error::CoreError;
use printquote_core::status::{RequestStatus, StatusId};
use printquote_core::types::{Amount, DbId, Timestamp};
use printquote_core::workflow::PriceState;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `design_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignRequest {
    pub id: DbId,
    pub customer_id: DbId,
    pub asset_key: String,
    pub asset_name: String,
    pub quantity: i32,
    pub size: Option<String>,
    pub status_id: StatusId,
    pub quoted_amount: Option<Amount>,
    pub final_amount: Option<Amount>,
    pub price_locked: bool,
    pub admin_notes: Option<String>,
    pub price_locked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DesignRequest {
    /// Decode the stored status id.
    pub fn status(&self) -> Result<RequestStatus, CoreError> {
        RequestStatus::from_id(self.status_id)
    }

    /// The price-relevant projection the workflow planner operates on.
    pub fn price_state(&self) -> Result<PriceState, CoreError> {
        Ok(PriceState {
            status: self.status()?,
            quoted_amount: self.quoted_amount,
            final_amount: self.final_amount,
            price_locked: self.price_locked,
        })
    }
}

/// DTO for inserting a newly submitted design request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignRequest {
    pub customer_id: DbId,
    pub asset_key: String,
    pub asset_name: String,
    pub quantity: i32,
    pub size: Option<String>,
}

/// Filters for listing design requests.
#[derive(Debug, Clone, Default)]
pub struct DesignRequestFilter {
    pub customer_id: Option<DbId>,
    pub status_id: Option<StatusId>,
    pub limit: i64,
    pub offset: i64,
}
