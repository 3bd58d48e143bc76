//! Repository for the `design_request_messages` thread.

use printquote_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

/// Column list for design_request_messages queries.
const COLUMNS: &str =
    "id, design_request_id, sender_role, sender_id, body, is_read, read_at, created_at";

/// Append, list and mark-read operations for the message thread.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO design_request_messages (design_request_id, sender_role, sender_id, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.design_request_id)
            .bind(&input.sender_role)
            .bind(input.sender_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// All messages for a request in creation order.
    pub async fn list_for_request(
        pool: &PgPool,
        design_request_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design_request_messages
             WHERE design_request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(design_request_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every unread message written by the other side as read.
    ///
    /// `reader_role` is the role doing the reading; messages it sent itself
    /// are never touched. Returns the number of messages flipped.
    pub async fn mark_read(
        pool: &PgPool,
        design_request_id: DbId,
        reader_role: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE design_request_messages SET is_read = true, read_at = NOW()
             WHERE design_request_id = $1 AND sender_role <> $2 AND is_read = false",
        )
        .bind(design_request_id)
        .bind(reader_role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count unread messages written by the other side.
    pub async fn unread_count(
        pool: &PgPool,
        design_request_id: DbId,
        reader_role: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM design_request_messages
             WHERE design_request_id = $1 AND sender_role <> $2 AND is_read = false",
        )
        .bind(design_request_id)
        .bind(reader_role)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
