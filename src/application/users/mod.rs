//! Users module: CRUD use-cases over the user repository

pub mod service;

pub use service::{SharedUserService, UserService};
