//! Well-known role names and the two negotiating parties.
//!
//! Role names arrive in JWT claims. Every role maps onto exactly one
//! [`Party`]: the customer who owns a design request, or the staff side
//! that quotes, locks and fulfils it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ADMIN: &str = "admin";

/// Which side of the negotiation an actor (or a ledger/message entry) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Customer,
    Staff,
}

impl Party {
    /// Value stored in `sender_role` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
        }
    }

    /// Parse a `sender_role` column value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "customer" => Ok(Self::Customer),
            "staff" => Ok(Self::Staff),
            other => Err(CoreError::Validation(format!(
                "Unknown sender role '{other}'. Must be one of: customer, staff"
            ))),
        }
    }

    /// Resolve the party an authenticated role acts as.
    ///
    /// `admin` acts on the staff side. Unknown roles are refused.
    pub fn for_role(role: &str) -> Result<Self, CoreError> {
        match role {
            ROLE_CUSTOMER => Ok(Self::Customer),
            ROLE_STAFF | ROLE_ADMIN => Ok(Self::Staff),
            other => Err(CoreError::Forbidden(format!("Unknown role '{other}'"))),
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
