//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the plain input struct used for inserts.

pub mod design_request;
pub mod message;
pub mod negotiation;
pub mod payment;
