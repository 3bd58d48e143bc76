//! Payment processor client.
//!
//! [`RazorpayProcessor`] speaks the Razorpay orders API: a `POST /orders`
//! creates the order the customer pays against, and the checkout callback
//! carries `(order_id, payment_id, signature)` where the signature is an
//! HMAC-SHA256 of `"{order_id}|{payment_id}"` under the merchant secret.

use std::time::Duration;

use async_trait::async_trait;
use printquote_core::payment::verify_signature;
use printquote_core::types::{Amount, DbId};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// HTTP request timeout for a single processor call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default processor API base URL.
const DEFAULT_API_BASE: &str = "https://api.razorpay.com/v1";

/// Default settlement currency.
const DEFAULT_CURRENCY: &str = "INR";

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

/// Input for creating a payment session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub design_request_id: DbId,
    pub amount: Amount,
}

/// A payment session the client completes with the processor's checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSession {
    /// Opaque handle the checkout widget is opened with.
    pub session_handle: String,
    pub external_order_id: String,
    pub amount: Amount,
    pub currency: String,
}

/// Fields the processor posts back once the customer has paid.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCallback {
    pub external_order_id: String,
    pub external_payment_id: String,
    pub signature: String,
}

/// A payment processor the payment gate can create sessions with.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an order for `request.amount` in the processor's currency.
    async fn create_session(&self, request: &SessionRequest)
        -> Result<PaymentSession, GatewayError>;

    /// Check that a callback was genuinely produced by the processor.
    fn verify_callback(&self, callback: &PaymentCallback) -> bool;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Processor credentials and endpoint.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub api_base: String,
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
}

impl PaymentConfig {
    /// Load processor configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                        |
    /// |----------------------|----------|--------------------------------|
    /// | `PAYMENT_API_BASE`   | no       | `https://api.razorpay.com/v1`  |
    /// | `PAYMENT_KEY_ID`     | **yes**  | --                             |
    /// | `PAYMENT_KEY_SECRET` | **yes**  | --                             |
    /// | `PAYMENT_CURRENCY`   | no       | `INR`                          |
    ///
    /// # Panics
    ///
    /// Panics if either credential is missing or empty.
    pub fn from_env() -> Self {
        let api_base = std::env::var("PAYMENT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let key_id = std::env::var("PAYMENT_KEY_ID").expect("PAYMENT_KEY_ID must be set");
        let key_secret =
            std::env::var("PAYMENT_KEY_SECRET").expect("PAYMENT_KEY_SECRET must be set");
        assert!(!key_id.is_empty(), "PAYMENT_KEY_ID must not be empty");
        assert!(!key_secret.is_empty(), "PAYMENT_KEY_SECRET must not be empty");
        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.into());

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
            currency,
        }
    }
}

// ---------------------------------------------------------------------------
// Razorpay client
// ---------------------------------------------------------------------------

/// Order creation request body.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: Amount,
    currency: &'a str,
    receipt: String,
}

/// Subset of the order object returned by `POST /orders`.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: Amount,
    currency: String,
}

/// HTTP client for a Razorpay-compatible orders API.
pub struct RazorpayProcessor {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl RazorpayProcessor {
    /// Build a processor client with a request timeout.
    pub fn new(config: PaymentConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Receipt string attached to each order for reconciliation.
    fn receipt_for(design_request_id: DbId) -> String {
        format!("design-request-{design_request_id}")
    }
}

#[async_trait]
impl PaymentProcessor for RazorpayProcessor {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<PaymentSession, GatewayError> {
        let body = CreateOrderBody {
            amount: request.amount,
            currency: &self.config.currency,
            receipt: Self::receipt_for(request.design_request_id),
        };

        let response = self
            .client
            .post(format!("{}/orders", self.config.api_base))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let order = response.json::<OrderResponse>().await?;
        tracing::debug!(
            design_request_id = request.design_request_id,
            external_order_id = %order.id,
            amount = order.amount,
            "Payment order created"
        );

        Ok(PaymentSession {
            session_handle: self.config.key_id.clone(),
            external_order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    fn verify_callback(&self, callback: &PaymentCallback) -> bool {
        verify_signature(
            &self.config.key_secret,
            &callback.external_order_id,
            &callback.external_payment_id,
            &callback.signature,
        )
    }
}
