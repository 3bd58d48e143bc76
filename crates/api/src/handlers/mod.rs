//! HTTP handlers for the two presentation adapters and the payment webhook.
//!
//! Handlers never change state themselves: they validate input, call the
//! workflow services with the caller's [`Actor`](printquote_workflow::Actor)
//! and project the returned row.

pub mod admin;
pub mod customer;
pub mod messages;
pub mod payments;

use printquote_core::status::RequestStatus;
use validator::Validate;

use crate::error::AppResult;

/// Run derive-based validation on a request body.
pub(crate) fn validated<T: Validate>(input: T) -> AppResult<T> {
    input.validate()?;
    Ok(input)
}

/// Parse an optional `?status=` filter.
pub(crate) fn parse_status(name: Option<&str>) -> AppResult<Option<RequestStatus>> {
    Ok(name
        .filter(|n| !n.is_empty())
        .map(RequestStatus::from_name)
        .transpose()?)
}
