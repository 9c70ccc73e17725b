//! Application Layer
//!
//! Admin use cases over users.

pub mod create_user;
pub mod lifecycle;
pub mod query_users;
pub mod update_user;

pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use lifecycle::UserLifecycleUseCase;
pub use query_users::UserQueryUseCase;
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
