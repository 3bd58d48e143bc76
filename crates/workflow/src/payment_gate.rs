//! Payment gate: exchanges a locked price for a verified external payment.
//!
//! Verification arrives at least once and possibly concurrently (the
//! customer's client confirmation and the processor webhook carry the same
//! callback). Settlement is a single transaction guarded on the record still
//! being open and the request still being `payment_pending`, so only one
//! delivery moves the request to `paid`; the others return the settled
//! request unchanged.

use std::sync::Arc;

use printquote_core::error::CoreError;
use printquote_core::roles::Party;
use printquote_core::status::PaymentStatus;
use printquote_core::types::DbId;
use printquote_core::workflow::{plan_payment_confirmation, plan_payment_initiation, WorkflowError};
use printquote_db::models::design_request::DesignRequest;
use printquote_db::models::payment::{CreatePaymentRecord, PaymentRecord};
use printquote_db::repositories::payment_repo::ConfirmOutcome;
use printquote_db::repositories::{DesignRequestRepo, PaymentRepo};
use printquote_db::DbPool;
use printquote_gateway::{PaymentCallback, PaymentProcessor, PaymentSession, SessionRequest};

use crate::actor::{load_request, Actor};
use crate::error::ServiceError;

#[derive(Clone)]
pub struct PaymentGate {
    pool: DbPool,
    processor: Arc<dyn PaymentProcessor>,
}

impl PaymentGate {
    pub fn new(pool: DbPool, processor: Arc<dyn PaymentProcessor>) -> Self {
        Self { pool, processor }
    }

    /// Open a payment session for the locked final amount.
    ///
    /// The processor is called before anything is stored; if it fails no
    /// record is written and the caller may simply retry.
    pub async fn initiate_payment(
        &self,
        id: DbId,
        actor: &Actor,
    ) -> Result<PaymentSession, ServiceError> {
        actor.require(Party::Customer, "initiate_payment")?;
        let request = load_request(&self.pool, id, actor, "initiate_payment").await?;
        let amount = plan_payment_initiation(&request.price_state()?)?;

        let session = self
            .processor
            .create_session(&SessionRequest {
                design_request_id: id,
                amount,
            })
            .await
            .map_err(|e| {
                tracing::warn!(design_request_id = id, error = %e, "Payment session creation failed");
                WorkflowError::UpstreamUnavailable("Payment processor unavailable".into())
            })?;

        let record = PaymentRepo::create(
            &self.pool,
            &CreatePaymentRecord {
                design_request_id: id,
                amount,
                currency: session.currency.clone(),
                external_order_id: session.external_order_id.clone(),
            },
        )
        .await?;

        tracing::info!(
            design_request_id = id,
            user_id = actor.user_id,
            payment_record_id = record.id,
            external_order_id = %record.external_order_id,
            amount,
            "Payment initiated"
        );
        Ok(session)
    }

    /// Verify the customer's client-side confirmation for request `id`.
    pub async fn verify_payment(
        &self,
        id: DbId,
        actor: &Actor,
        callback: &PaymentCallback,
    ) -> Result<DesignRequest, ServiceError> {
        actor.require(Party::Customer, "verify_payment")?;
        load_request(&self.pool, id, actor, "verify_payment").await?;

        let record = self.find_record(callback).await?;
        if record.design_request_id != id {
            tracing::warn!(
                design_request_id = id,
                external_order_id = %callback.external_order_id,
                "Payment callback order belongs to another request"
            );
            return Err(WorkflowError::PaymentVerificationFailed {
                reference: callback.external_order_id.clone(),
            }
            .into());
        }
        self.settle(record, callback).await
    }

    /// Verify a processor webhook delivery; the request is found by order id.
    pub async fn verify_webhook(
        &self,
        callback: &PaymentCallback,
    ) -> Result<DesignRequest, ServiceError> {
        let record = self.find_record(callback).await?;
        self.settle(record, callback).await
    }

    /// Payment records for a request in creation order.
    pub async fn history(
        &self,
        id: DbId,
        actor: &Actor,
    ) -> Result<Vec<PaymentRecord>, ServiceError> {
        load_request(&self.pool, id, actor, "view_payments").await?;
        Ok(PaymentRepo::list_for_request(&self.pool, id).await?)
    }

    async fn find_record(&self, callback: &PaymentCallback) -> Result<PaymentRecord, ServiceError> {
        PaymentRepo::find_by_order_id(&self.pool, &callback.external_order_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    external_order_id = %callback.external_order_id,
                    "Payment callback for unknown order"
                );
                ServiceError::from(WorkflowError::PaymentVerificationFailed {
                    reference: callback.external_order_id.clone(),
                })
            })
    }

    async fn current_request(&self, id: DbId) -> Result<DesignRequest, ServiceError> {
        Ok(DesignRequestRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "DesignRequest",
                id,
            })?)
    }

    /// Check the callback and, if genuine, settle the record and mark the
    /// request paid.
    async fn settle(
        &self,
        record: PaymentRecord,
        callback: &PaymentCallback,
    ) -> Result<DesignRequest, ServiceError> {
        let request_id = record.design_request_id;
        let reference = callback.external_payment_id.as_str();

        if !self.processor.verify_callback(callback) {
            let marked = PaymentRepo::mark_failed(&self.pool, record.id, reference).await?;
            tracing::warn!(
                design_request_id = request_id,
                payment_record_id = record.id,
                external_order_id = %callback.external_order_id,
                external_payment_id = reference,
                marked_failed = marked,
                "Payment signature mismatch"
            );
            return Err(WorkflowError::PaymentVerificationFailed {
                reference: reference.to_string(),
            }
            .into());
        }

        // Redelivery of a callback that already settled.
        if record.status()? == PaymentStatus::Succeeded {
            tracing::debug!(
                design_request_id = request_id,
                payment_record_id = record.id,
                "Payment already verified"
            );
            return self.current_request(request_id).await;
        }

        let request = self.current_request(request_id).await?;
        let state = request.price_state()?;
        if let Err(e) = plan_payment_confirmation(&state, record.amount, reference) {
            if matches!(e, WorkflowError::PaymentVerificationFailed { .. }) {
                PaymentRepo::mark_failed(&self.pool, record.id, reference).await?;
            }
            tracing::warn!(
                design_request_id = request_id,
                payment_record_id = record.id,
                external_payment_id = reference,
                amount = record.amount,
                final_amount = ?state.final_amount,
                "Payment not accepted: {e}"
            );
            return Err(e.into());
        }

        match PaymentRepo::confirm(&self.pool, record.id, request_id, record.amount, reference)
            .await?
        {
            ConfirmOutcome::Confirmed { record, request } => {
                tracing::info!(
                    design_request_id = request_id,
                    payment_record_id = record.id,
                    external_payment_id = reference,
                    amount = record.amount,
                    from = %state.status,
                    to = %request.status()?,
                    "Payment verified"
                );
                Ok(request)
            }
            ConfirmOutcome::RecordNotOpen => {
                tracing::debug!(
                    design_request_id = request_id,
                    payment_record_id = record.id,
                    "Concurrent delivery settled the payment first"
                );
                self.current_request(request_id).await
            }
            ConfirmOutcome::RequestNotPayable => {
                let current = self.current_request(request_id).await?.price_state()?;
                let err = plan_payment_confirmation(&current, record.amount, reference)
                    .err()
                    .unwrap_or(WorkflowError::InvalidTransition {
                        action: "confirm_payment",
                        status: current.status,
                    });
                tracing::warn!(
                    design_request_id = request_id,
                    payment_record_id = record.id,
                    "Request stopped being payable during verification: {err}"
                );
                Err(err.into())
            }
        }
    }
}
