pub mod error;
pub mod validated_json;

pub use error::{plain_text, status_for, ApiError, ErrorResponse};
pub use validated_json::ValidatedJson;
