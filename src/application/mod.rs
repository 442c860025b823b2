pub mod users;

// Re-export key types for convenience
pub use users::{SharedUserService, UserService};
