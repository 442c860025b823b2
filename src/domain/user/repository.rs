use async_trait::async_trait;

use super::{User, UserId};
use crate::shared::InfraResult;

/// Persistence contract consumed by `UserService`.
///
/// Implementations own id assignment and the unique `(first_name, last_name)`
/// constraint; a violated constraint must surface as
/// [`InfraError::UniqueViolation`](crate::shared::InfraError::UniqueViolation).
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert when `user.id` is `None`, otherwise overwrite the row with that id.
    async fn save(&self, user: User) -> InfraResult<User>;

    async fn find_by_id(&self, id: UserId) -> InfraResult<Option<User>>;
    async fn exists_by_id(&self, id: UserId) -> InfraResult<bool>;
    async fn exists_by_name_pair(&self, first_name: &str, last_name: &str) -> InfraResult<bool>;
    async fn count(&self) -> InfraResult<u64>;

    async fn delete_by_id(&self, id: UserId) -> InfraResult<()>;
}
