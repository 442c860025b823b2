//! User domain model

use crate::shared::{DomainError, DomainResult};

/// Store-assigned identifier of a user.
pub type UserId = i64;

/// A person with a contact number.
///
/// `id` is `None` until the first save; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
}

impl User {
    /// Create an unsaved user.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            contact_number: contact_number.into(),
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Parse a raw path segment into a [`UserId`].
///
/// A segment that is not a valid id cannot name a stored user, so it is
/// reported as not found rather than as a malformed request.
pub fn parse_user_id(raw: &str) -> DomainResult<UserId> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| DomainError::user_not_found(raw))
}
