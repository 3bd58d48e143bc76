//! Domain layer for the custom-design quotation workflow.
//!
//! Everything in this crate is IO-free: identifiers, error types, roles,
//! status lookups, the price negotiation transition planner, and the
//! payment signature scheme. The `db`, `workflow` and `api` crates build
//! on top of it.

pub mod error;
pub mod payment;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
pub mod workflow;
