//! Startup data seeding

use tracing::{info, warn};

use crate::domain::{User, UserRepositoryInterface};
use crate::shared::InfraResult;

/// Users inserted into an empty table on startup.
pub fn default_users() -> Vec<User> {
    vec![
        User::new("John", "Doe", "+27 123 456 789"),
        User::new("Jane", "Doe", "+98 765 432 100"),
    ]
}

/// Insert [`default_users`] when the table is empty.
///
/// Returns the number of users inserted. A populated table is left alone so
/// restarts never collide with the unique name pair.
pub async fn seed_default_users<R>(repo: &R) -> InfraResult<usize>
where
    R: UserRepositoryInterface + ?Sized,
{
    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Users table already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for user in default_users() {
        match repo.save(user).await {
            Ok(saved) => {
                info!(user_id = ?saved.id, first_name = %saved.first_name, last_name = %saved.last_name, "Seeded user");
                inserted += 1;
            }
            Err(e) => warn!("Failed to seed user: {}", e),
        }
    }
    Ok(inserted)
}
