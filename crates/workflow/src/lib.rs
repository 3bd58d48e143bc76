//! Services that drive the design request workflow.
//!
//! - [`NegotiationController`] -- quotes, counter-offers, the price lock,
//!   rejection and fulfillment progress.
//! - [`MessageThread`] -- the customer/staff chat log and its read state.
//! - [`PaymentGate`] -- turns a locked price into a verified payment.
//! - [`AssetLinks`] -- signed download URLs for uploaded design files.
//!
//! Every operation takes the authenticated [`Actor`]. Role and ownership are
//! checked before anything is read or written, and every state change is a
//! conditional write, so two actors racing on the same request can never
//! both win.

pub mod actor;
pub mod assets;
pub mod controller;
pub mod error;
pub mod payment_gate;
pub mod thread;

pub use actor::Actor;
pub use assets::AssetLinks;
pub use controller::{NegotiationController, NewDesignRequest, RequestPage};
pub use error::ServiceError;
pub use payment_gate::PaymentGate;
pub use thread::MessageThread;
