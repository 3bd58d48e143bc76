//! Repository for the `payment_records` table.

use printquote_core::status::{PaymentStatus, RequestStatus};
use printquote_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::design_request::DesignRequest;
use crate::models::payment::{CreatePaymentRecord, PaymentRecord};
use crate::repositories::design_request_repo::COLUMNS as REQUEST_COLUMNS;

/// Column list for payment_records queries.
const COLUMNS: &str = "id, design_request_id, amount, currency, status_id, external_order_id, \
    external_payment_id, verified_at, created_at, updated_at";

/// Outcome of [`PaymentRepo::confirm`].
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The record was settled and the request moved to `paid`.
    Confirmed {
        record: PaymentRecord,
        request: DesignRequest,
    },
    /// The record is no longer open (already settled by a concurrent callback).
    RecordNotOpen,
    /// The request is not `payment_pending` with a matching locked amount.
    RequestNotPayable,
}

/// Provides create, lookup and settlement operations for payment records.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record an initiated payment.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePaymentRecord,
    ) -> Result<PaymentRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_records (design_request_id, amount, currency, external_order_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentRecord>(&query)
            .bind(input.design_request_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.external_order_id)
            .fetch_one(pool)
            .await
    }

    /// Find a record by the processor's order id.
    pub async fn find_by_order_id(
        pool: &PgPool,
        external_order_id: &str,
    ) -> Result<Option<PaymentRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_records WHERE external_order_id = $1");
        sqlx::query_as::<_, PaymentRecord>(&query)
            .bind(external_order_id)
            .fetch_optional(pool)
            .await
    }

    /// All payment records for a request in creation order.
    pub async fn list_for_request(
        pool: &PgPool,
        design_request_id: DbId,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_records
             WHERE design_request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PaymentRecord>(&query)
            .bind(design_request_id)
            .fetch_all(pool)
            .await
    }

    /// Count settled records for a request.
    pub async fn count_succeeded(pool: &PgPool, design_request_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM payment_records WHERE design_request_id = $1 AND status_id = $2",
        )
        .bind(design_request_id)
        .bind(PaymentStatus::Succeeded.id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Mark an initiated record as failed. Settled or already-failed records
    /// are left alone; returns whether a row changed.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        external_payment_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE payment_records
             SET status_id = $2, external_payment_id = $3, verified_at = NOW()
             WHERE id = $1 AND status_id = $4",
        )
        .bind(id)
        .bind(PaymentStatus::Failed.id())
        .bind(external_payment_id)
        .bind(PaymentStatus::Initiated.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Settle a record and move its request to `paid` in one transaction.
    ///
    /// The record must still be `initiated` or `failed`, and the request must
    /// be `payment_pending` with `final_amount = amount`. If either guard
    /// misses, nothing is written.
    pub async fn confirm(
        pool: &PgPool,
        record_id: DbId,
        design_request_id: DbId,
        amount: Amount,
        external_payment_id: &str,
    ) -> Result<ConfirmOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE payment_records
             SET status_id = $2, external_payment_id = $3, verified_at = NOW()
             WHERE id = $1 AND status_id IN ($4, $5)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, PaymentRecord>(&query)
            .bind(record_id)
            .bind(PaymentStatus::Succeeded.id())
            .bind(external_payment_id)
            .bind(PaymentStatus::Initiated.id())
            .bind(PaymentStatus::Failed.id())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(record) = record else {
            tx.rollback().await?;
            return Ok(ConfirmOutcome::RecordNotOpen);
        };

        let query = format!(
            "UPDATE design_requests SET status_id = $2
             WHERE id = $1 AND status_id = $3 AND price_locked AND final_amount = $4
             RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, DesignRequest>(&query)
            .bind(design_request_id)
            .bind(RequestStatus::Paid.id())
            .bind(RequestStatus::PaymentPending.id())
            .bind(amount)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(request) = request else {
            tx.rollback().await?;
            return Ok(ConfirmOutcome::RequestNotPayable);
        };

        tx.commit().await?;
        Ok(ConfirmOutcome::Confirmed { record, request })
    }
}
