//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed IDs for entities (UUIDv7, time-ordered)
//! - The `{ "payload": ... }` response envelope every endpoint speaks
//! - Field-level validation errors shared by every request DTO
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod response;
pub mod validation;
