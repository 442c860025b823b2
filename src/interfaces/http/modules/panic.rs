//! Outermost fault boundary
//!
//! A panic anywhere below the router is turned into a plain-text 500
//! carrying the panic message, the same shape as an unclassified service
//! fault.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;
use tracing::error;

use crate::interfaces::http::common::plain_text;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Internal server error".to_string()
    }
}

/// Response builder for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    error!(panic = %message, "Request handler panicked");
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, message)
}
