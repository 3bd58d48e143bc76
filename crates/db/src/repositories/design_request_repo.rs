//! Repository for the `design_requests` table.
//!
//! Price and status changes go through [`DesignRequestRepo::apply_transition`],
//! a conditional write guarded on the status, lock flag and quoted amount the
//! caller planned against. A concurrent actor that got there first makes the guard
//! fail, and the caller sees `Ok(None)` instead of a lost update.

use printquote_core::status::StatusId;
use printquote_core::types::DbId;
use printquote_core::workflow::{PriceState, Transition};
use sqlx::PgPool;

use crate::models::design_request::{CreateDesignRequest, DesignRequest, DesignRequestFilter};
use crate::models::negotiation::CreateNegotiationEntry;
use crate::repositories::NegotiationRepo;

/// Column list for design_requests queries.
pub(crate) const COLUMNS: &str = "id, customer_id, asset_key, asset_name, quantity, size, \
    status_id, quoted_amount, final_amount, price_locked, admin_notes, price_locked_at, \
    created_at, updated_at";

/// Provides CRUD and guarded transition writes for design requests.
pub struct DesignRequestRepo;

impl DesignRequestRepo {
    /// Insert a new request in `pending_review`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDesignRequest,
    ) -> Result<DesignRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO design_requests (customer_id, asset_key, asset_name, quantity, size)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignRequest>(&query)
            .bind(input.customer_id)
            .bind(&input.asset_key)
            .bind(&input.asset_name)
            .bind(input.quantity)
            .bind(&input.size)
            .fetch_one(pool)
            .await
    }

    /// Find a design request by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DesignRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM design_requests WHERE id = $1");
        sqlx::query_as::<_, DesignRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, newest first, optionally narrowed to a customer and/or status.
    pub async fn list(
        pool: &PgPool,
        filter: &DesignRequestFilter,
    ) -> Result<Vec<DesignRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design_requests
             WHERE ($1::BIGINT IS NULL OR customer_id = $1)
               AND ($2::SMALLINT IS NULL OR status_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, DesignRequest>(&query)
            .bind(filter.customer_id)
            .bind(filter.status_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Count requests matching the same filters as [`Self::list`].
    pub async fn count(
        pool: &PgPool,
        customer_id: Option<DbId>,
        status_id: Option<StatusId>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM design_requests
             WHERE ($1::BIGINT IS NULL OR customer_id = $1)
               AND ($2::SMALLINT IS NULL OR status_id = $2)",
        )
        .bind(customer_id)
        .bind(status_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Overwrite the staff-only notes. Last write wins; price fields are untouched.
    pub async fn update_admin_notes(
        pool: &PgPool,
        id: DbId,
        admin_notes: Option<&str>,
    ) -> Result<Option<DesignRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE design_requests SET admin_notes = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignRequest>(&query)
            .bind(id)
            .bind(admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// Apply a planned transition atomically.
    ///
    /// The status write only matches while the row still has
    /// `transition.from` and the lock flag and quoted amount of `expected`.
    /// A status can recur across negotiation rounds, so the quoted amount is
    /// what pins a lock to the price it was planned against. The ledger entry
    /// (if any) is appended in the same transaction. Returns `Ok(None)` when
    /// the guard did not match, in which case nothing was written.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        actor_id: DbId,
        transition: &Transition,
        expected: &PriceState,
        note: Option<&str>,
    ) -> Result<Option<DesignRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE design_requests SET
                status_id = $2,
                quoted_amount = COALESCE($3::BIGINT, quoted_amount),
                final_amount = COALESCE($4::BIGINT, final_amount),
                price_locked = price_locked OR $4::BIGINT IS NOT NULL,
                price_locked_at = CASE WHEN $4::BIGINT IS NOT NULL THEN NOW()
                                       ELSE price_locked_at END
             WHERE id = $1 AND status_id = $5 AND price_locked = $6
               AND quoted_amount IS NOT DISTINCT FROM $7
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, DesignRequest>(&query)
            .bind(id)
            .bind(transition.to.id())
            .bind(transition.quoted_amount)
            .bind(transition.locked_amount)
            .bind(transition.from.id())
            .bind(expected.price_locked)
            .bind(expected.quoted_amount)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(updated) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(entry) = transition.ledger_entry {
            NegotiationRepo::create(
                &mut *tx,
                &CreateNegotiationEntry {
                    design_request_id: id,
                    sender_role: entry.party.as_str().to_string(),
                    sender_id: actor_id,
                    amount: entry.amount,
                    note: note.map(str::to_string),
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(Some(updated))
    }
}
