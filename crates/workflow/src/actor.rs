//! The authenticated caller of a workflow operation.

use printquote_core::error::CoreError;
use printquote_core::roles::Party;
use printquote_core::types::DbId;
use printquote_core::workflow::WorkflowError;
use printquote_db::models::design_request::DesignRequest;
use printquote_db::repositories::DesignRequestRepo;
use printquote_db::DbPool;

use crate::error::ServiceError;

/// Who is calling, and on which side of the negotiation they act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub party: Party,
}

impl Actor {
    pub fn customer(user_id: DbId) -> Self {
        Self {
            user_id,
            party: Party::Customer,
        }
    }

    pub fn staff(user_id: DbId) -> Self {
        Self {
            user_id,
            party: Party::Staff,
        }
    }

    /// Refuse the call unless the actor is on the `required` side.
    pub fn require(&self, required: Party, action: &'static str) -> Result<(), WorkflowError> {
        if self.party == required {
            return Ok(());
        }
        tracing::warn!(
            user_id = self.user_id,
            party = %self.party,
            action,
            "Role violation: requires {required}"
        );
        Err(WorkflowError::RoleViolation {
            action,
            reason: format!("requires the {required} role"),
        })
    }
}

/// Load a request the actor is allowed to see.
///
/// Staff see every request; a customer only their own.
pub(crate) async fn load_request(
    pool: &DbPool,
    id: DbId,
    actor: &Actor,
    action: &'static str,
) -> Result<DesignRequest, ServiceError> {
    let request = DesignRequestRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "DesignRequest",
            id,
        })?;

    if actor.party == Party::Customer && request.customer_id != actor.user_id {
        tracing::warn!(
            user_id = actor.user_id,
            design_request_id = id,
            action,
            "Role violation: customer does not own request"
        );
        return Err(WorkflowError::RoleViolation {
            action,
            reason: "the request belongs to another customer".to_string(),
        }
        .into());
    }

    Ok(request)
}
