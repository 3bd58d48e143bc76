//! Customer/staff message thread.
//!
//! Messages are independent of price and status: either party may write in
//! any status, and nothing here touches the design request row.

use printquote_core::types::DbId;
use printquote_core::validation::normalize_message;
use printquote_db::models::message::{CreateMessage, Message};
use printquote_db::repositories::MessageRepo;
use printquote_db::DbPool;

use crate::actor::{load_request, Actor};
use crate::error::ServiceError;

#[derive(Clone)]
pub struct MessageThread {
    pool: DbPool,
}

impl MessageThread {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a message from the actor.
    pub async fn send(&self, id: DbId, actor: &Actor, text: &str) -> Result<Message, ServiceError> {
        load_request(&self.pool, id, actor, "send_message").await?;
        let body = normalize_message(text)?;

        let message = MessageRepo::create(
            &self.pool,
            &CreateMessage {
                design_request_id: id,
                sender_role: actor.party.as_str().to_string(),
                sender_id: actor.user_id,
                body,
            },
        )
        .await?;
        tracing::debug!(
            design_request_id = id,
            message_id = message.id,
            sender = %actor.party,
            "Message sent"
        );
        Ok(message)
    }

    /// The thread as the actor sees it: the other party's messages are marked
    /// read first, then the whole thread is returned in creation order.
    pub async fn list(&self, id: DbId, actor: &Actor) -> Result<Vec<Message>, ServiceError> {
        load_request(&self.pool, id, actor, "view_messages").await?;
        MessageRepo::mark_read(&self.pool, id, actor.party.as_str()).await?;
        Ok(MessageRepo::list_for_request(&self.pool, id).await?)
    }

    /// Mark the other party's unread messages as read. Returns how many flipped.
    pub async fn mark_read(&self, id: DbId, actor: &Actor) -> Result<u64, ServiceError> {
        load_request(&self.pool, id, actor, "view_messages").await?;
        Ok(MessageRepo::mark_read(&self.pool, id, actor.party.as_str()).await?)
    }

    /// Unread messages written by the other party.
    pub async fn unread_count(&self, id: DbId, actor: &Actor) -> Result<i64, ServiceError> {
        load_request(&self.pool, id, actor, "view_messages").await?;
        Ok(MessageRepo::unread_count(&self.pool, id, actor.party.as_str()).await?)
    }
}
