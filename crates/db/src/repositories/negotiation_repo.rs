//! Repository for the append-only `negotiation_entries` ledger.

use printquote_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::negotiation::{CreateNegotiationEntry, NegotiationEntry};

/// Column list for negotiation_entries queries.
const COLUMNS: &str = "id, design_request_id, sender_role, sender_id, amount, note, created_at";

/// Append and read ledger entries. There is no update or delete.
pub struct NegotiationRepo;

impl NegotiationRepo {
    /// Append an entry on the caller's connection (normally inside the
    /// transaction that also writes the design request status).
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateNegotiationEntry,
    ) -> Result<NegotiationEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO negotiation_entries
                (design_request_id, sender_role, sender_id, amount, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NegotiationEntry>(&query)
            .bind(input.design_request_id)
            .bind(&input.sender_role)
            .bind(input.sender_id)
            .bind(input.amount)
            .bind(&input.note)
            .fetch_one(conn)
            .await
    }

    /// All entries for a request in creation order.
    pub async fn list_for_request(
        pool: &PgPool,
        design_request_id: DbId,
    ) -> Result<Vec<NegotiationEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM negotiation_entries
             WHERE design_request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, NegotiationEntry>(&query)
            .bind(design_request_id)
            .fetch_all(pool)
            .await
    }
}
