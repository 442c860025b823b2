//! # User CRUD Service
//!
//! REST service for creating, reading, updating and deleting users with a
//! validated contact number.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: The `User` entity and the repository trait
//! - **application**: The `UserService` use-cases and their failure kinds
//! - **infrastructure**: SeaORM/SQLite and in-memory repositories, seeding
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error types, contact-number validation, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryUserRepository, SeaOrmUserRepository};

// Re-export API router
pub use interfaces::create_api_router;

pub use application::{SharedUserService, UserService};
pub use shared::{is_valid_contact_number, DomainError, DomainResult};
