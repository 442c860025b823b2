//! User aggregate
//!
//! Contains the User entity and the repository interface.

pub mod model;
pub mod repository;

pub use model::{parse_user_id, User, UserId};
pub use repository::UserRepositoryInterface;
