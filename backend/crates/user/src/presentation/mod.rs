//! Presentation Layer
//!
//! HTTP handlers, DTOs and the admin router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::UserAppState;
pub use router::user_router;
