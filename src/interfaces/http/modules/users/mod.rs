//! Users module: user CRUD endpoints

pub mod dto;
pub mod handlers;

#[cfg(test)]
mod tests;

pub use dto::*;
pub use handlers::*;
