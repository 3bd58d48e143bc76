//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a connection inside a caller's transaction) as the
//! first argument.

pub mod design_request_repo;
pub mod message_repo;
pub mod negotiation_repo;
pub mod payment_repo;

pub use design_request_repo::DesignRequestRepo;
pub use message_repo::MessageRepo;
pub use negotiation_repo::NegotiationRepo;
pub use payment_repo::PaymentRepo;
