pub mod health;
pub mod metrics;
pub mod panic;
pub mod request_id;
pub mod users;
