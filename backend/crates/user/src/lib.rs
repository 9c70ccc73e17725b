//! User Management Backend Module
//!
//! Admin-only CRUD over the `users` table:
//! - `domain/` - list queries, stats, repository trait
//! - `application/` - query, create, update and lifecycle use cases
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - handlers, DTOs, router
//!
//! Deletion is soft by default (`deleted_at`); `/permanent` removes the row
//! and `/restore` clears the marker. Every route sits behind `require_auth`
//! and `require_one_of_roles(admin)` from the auth crate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::query::{ListQuery, SortField, SortOrder, UserStats};
pub use error::{UserError, UserResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::{UserAppState, user_router};
