//! Domain Layer
//!
//! List queries, stats and the admin repository trait. The `User` entity
//! itself is shared with the auth crate.

pub mod query;
pub mod repository;

pub use query::{ListQuery, SortField, SortOrder, UserStats};
pub use repository::UserAdminRepository;
