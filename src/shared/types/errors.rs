use thiserror::Error;

/// Failure kinds returned by the service layer.
///
/// Every variant carries the human-readable message that ends up in the
/// `error` field of the HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input fails domain validation (contact number format, id mismatch).
    #[error("{0}")]
    InvalidArgument(String),

    /// The `(first_name, last_name)` pair is already taken.
    #[error("{0}")]
    AlreadyExists(String),

    /// The referenced id does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A save or delete against the store failed.
    #[error("{0}")]
    DataAccessFailure(String),

    /// Anything else; reported as a plain-text 500.
    #[error("{0}")]
    Unclassified(String),
}

impl DomainError {
    pub fn user_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("User with ID {} not found.", id))
    }

    /// Short label used for log fields and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound(_) => "not_found",
            Self::DataAccessFailure(_) => "data_access_failure",
            Self::Unclassified(_) => "unclassified",
        }
    }
}

/// Faults raised by the persistence collaborators.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Lookups are not classified any further; the HTTP boundary reports them
/// as a bare 500.
impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Unclassified(e.to_string())
    }
}

/// Result type for service operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for repository operations
pub type InfraResult<T> = Result<T, InfraError>;
