pub mod user;

// Re-export commonly used types
pub use user::{parse_user_id, User, UserId, UserRepositoryInterface};

pub use crate::shared::{DomainError, DomainResult};
