//! User management service
//!
//! Validates input, delegates to the repository and turns every outcome into
//! a [`DomainError`] kind. HTTP handlers are thin wrappers around this.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{User, UserId, UserRepositoryInterface};
use crate::shared::{is_valid_contact_number, DomainError, DomainResult, InfraError};

pub const INVALID_CONTACT_NUMBER: &str = "Invalid phone number format for user.";
pub const DUPLICATE_NAME_PAIR: &str =
    "User with the same first name and last name already exists.";
pub const ID_MISMATCH: &str = "User ID in request body does not match path.";

/// Service shared by the HTTP handlers, with the store picked at startup.
pub type SharedUserService = Arc<UserService<dyn UserRepositoryInterface>>;

/// Failures of `save`/`delete_by_id`. A unique-index hit means a concurrent
/// writer took the name pair first.
fn write_failure(e: InfraError) -> DomainError {
    match e {
        InfraError::UniqueViolation(_) => DomainError::AlreadyExists(DUPLICATE_NAME_PAIR.into()),
        other => DomainError::DataAccessFailure(other.to_string()),
    }
}

fn record<T>(operation: &'static str, result: &DomainResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::counter!("users_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Orchestrates the user CRUD use-cases.
///
/// Generic over the repository; the server runs it over
/// `dyn UserRepositoryInterface`.
pub struct UserService<R: UserRepositoryInterface + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persist a new user. Any id on `user` is discarded; the store assigns one.
    pub async fn add_user(&self, user: User) -> DomainResult<User> {
        let result = self.try_add(user).await;
        record("add", &result);
        result
    }

    /// Overwrite the user stored under `id` with the supplied fields.
    pub async fn update_user(&self, id: UserId, user: User) -> DomainResult<User> {
        let result = self.try_update(id, user).await;
        record("update", &result);
        result
    }

    pub async fn get_user(&self, id: UserId) -> DomainResult<User> {
        let result = self.try_get(id).await;
        record("get", &result);
        result
    }

    pub async fn delete_user(&self, id: UserId) -> DomainResult<()> {
        let result = self.try_delete(id).await;
        record("delete", &result);
        result
    }

    async fn try_add(&self, mut user: User) -> DomainResult<User> {
        info!(first_name = %user.first_name, last_name = %user.last_name, "Adding user");

        if !is_valid_contact_number(&user.contact_number) {
            error!(contact_number = %user.contact_number, "Invalid phone number format for user");
            return Err(DomainError::InvalidArgument(INVALID_CONTACT_NUMBER.into()));
        }

        if self
            .repo
            .exists_by_name_pair(&user.first_name, &user.last_name)
            .await?
        {
            warn!(first_name = %user.first_name, last_name = %user.last_name, "Name pair already taken");
            return Err(DomainError::AlreadyExists(DUPLICATE_NAME_PAIR.into()));
        }

        user.id = None;
        let saved = self.repo.save(user).await.map_err(|e| {
            error!("Failed to add user: {}", e);
            write_failure(e)
        })?;

        info!(user_id = ?saved.id, "Successfully added user");
        Ok(saved)
    }

    async fn try_update(&self, id: UserId, user: User) -> DomainResult<User> {
        info!(user_id = id, "Updating user");

        if !is_valid_contact_number(&user.contact_number) {
            error!(user_id = id, contact_number = %user.contact_number, "Invalid phone number format for user");
            return Err(DomainError::InvalidArgument(INVALID_CONTACT_NUMBER.into()));
        }

        if let Some(body_id) = user.id {
            if body_id != id {
                error!(user_id = id, body_id, "User ID in body does not match path");
                return Err(DomainError::InvalidArgument(ID_MISMATCH.into()));
            }
        }

        if !self.repo.exists_by_id(id).await? {
            error!(user_id = id, "User not found for update");
            return Err(DomainError::user_not_found(id));
        }

        let updated = self.repo.save(user.with_id(id)).await.map_err(|e| {
            error!(user_id = id, "Failed to update user: {}", e);
            write_failure(e)
        })?;

        info!(user_id = id, "Successfully updated user");
        Ok(updated)
    }

    async fn try_get(&self, id: UserId) -> DomainResult<User> {
        info!(user_id = id, "Retrieving user");

        match self.repo.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(user_id = id, "User not found");
                Err(DomainError::user_not_found(id))
            }
        }
    }

    async fn try_delete(&self, id: UserId) -> DomainResult<()> {
        info!(user_id = id, "Deleting user");

        if !self.repo.exists_by_id(id).await? {
            warn!(user_id = id, "User not found");
            return Err(DomainError::user_not_found(id));
        }

        self.repo.delete_by_id(id).await.map_err(|e| {
            error!(user_id = id, "Failed to delete user: {}", e);
            DomainError::DataAccessFailure(e.to_string())
        })?;

        info!(user_id = id, "Successfully deleted user");
        Ok(())
    }
}
