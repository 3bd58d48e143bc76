//! In-memory collaborators for tests.
//!
//! [`FakePaymentProcessor`] hands out sequential order ids and verifies
//! signatures with a fixed secret, so tests can produce genuine callbacks
//! with [`FakePaymentProcessor::sign`]. Both fakes can be told to fail to
//! exercise the upstream-unavailable paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use printquote_core::payment::{compute_signature, verify_signature};

use crate::assets::AssetStore;
use crate::error::GatewayError;
use crate::payment::{PaymentCallback, PaymentProcessor, PaymentSession, SessionRequest};

pub const FAKE_KEY_ID: &str = "rzp_test_fake";
pub const FAKE_SECRET: &str = "fake_secret";

#[derive(Default)]
pub struct FakePaymentProcessor {
    next_order: AtomicU64,
    unavailable: AtomicBool,
}

impl FakePaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create_session` calls fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of sessions created so far.
    pub fn sessions_created(&self) -> u64 {
        self.next_order.load(Ordering::SeqCst)
    }

    /// Build a callback the processor would accept.
    pub fn sign(&self, external_order_id: &str, external_payment_id: &str) -> PaymentCallback {
        PaymentCallback {
            external_order_id: external_order_id.to_string(),
            external_payment_id: external_payment_id.to_string(),
            signature: compute_signature(FAKE_SECRET, external_order_id, external_payment_id),
        }
    }

    /// Build a callback with a signature from the wrong key.
    pub fn forge(&self, external_order_id: &str, external_payment_id: &str) -> PaymentCallback {
        PaymentCallback {
            external_order_id: external_order_id.to_string(),
            external_payment_id: external_payment_id.to_string(),
            signature: compute_signature("not_the_secret", external_order_id, external_payment_id),
        }
    }
}

#[async_trait]
impl PaymentProcessor for FakePaymentProcessor {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<PaymentSession, GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 503,
                body: "fake processor unavailable".to_string(),
            });
        }
        let n = self.next_order.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentSession {
            session_handle: FAKE_KEY_ID.to_string(),
            external_order_id: format!("order_fake_{}_{n}", request.design_request_id),
            amount: request.amount,
            currency: "INR".to_string(),
        })
    }

    fn verify_callback(&self, callback: &PaymentCallback) -> bool {
        verify_signature(
            FAKE_SECRET,
            &callback.external_order_id,
            &callback.external_payment_id,
            &callback.signature,
        )
    }
}

#[derive(Default)]
pub struct FakeAssetStore {
    unavailable: AtomicBool,
}

impl FakeAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Storage("fake store unavailable".to_string()));
        }
        Ok(format!("https://assets.test/{key}?expires={}", ttl.as_secs()))
    }
}
