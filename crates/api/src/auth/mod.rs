//! Token validation.

pub mod jwt;
