//! External collaborators of the quotation workflow.
//!
//! - [`payment`] -- payment session creation and callback signature checks.
//! - [`assets`] -- time-limited download URLs for uploaded design files.
//!
//! Both are exposed as object-safe traits so the workflow and API layers can
//! hold them as `Arc<dyn ...>` and tests can swap in fakes.

pub mod assets;
pub mod error;
pub mod payment;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use assets::{AssetStore, S3AssetStore};
pub use error::GatewayError;
pub use payment::{
    PaymentCallback, PaymentConfig, PaymentProcessor, PaymentSession, RazorpayProcessor,
    SessionRequest,
};
