//! HTTP REST API interfaces
//!
//! - `common`: error mapping and validated JSON extraction
//! - `modules`: per-resource handlers and middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
