//! In-memory user repository
//!
//! Used by tests and `--in-memory` runs. Mirrors the database schema: ids are
//! handed out by an atomic counter and the name pair is unique.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{User, UserId, UserRepositoryInterface};
use crate::shared::{InfraError, InfraResult};

type NamePair = (String, String);

fn name_pair(user: &User) -> NamePair {
    (user.first_name.clone(), user.last_name.clone())
}

fn duplicate(pair: &NamePair) -> InfraError {
    InfraError::UniqueViolation(format!("users.first_name, users.last_name ({} {})", pair.0, pair.1))
}

/// In-memory storage for development and testing
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
    /// Name pair index; claiming an entry here is what makes the pair unique.
    names: DashMap<NamePair, UserId>,
    id_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            names: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    fn claim_name(&self, pair: NamePair, id: UserId) -> InfraResult<()> {
        match self.names.entry(pair) {
            Entry::Occupied(e) if *e.get() != id => Err(duplicate(e.key())),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(e) => {
                e.insert(id);
                Ok(())
            }
        }
    }

    fn insert(&self, mut user: User) -> InfraResult<User> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        self.claim_name(name_pair(&user), id)?;
        user.id = Some(id);
        self.users.insert(id, user.clone());
        Ok(user)
    }

    fn overwrite(&self, id: UserId, user: User) -> InfraResult<User> {
        let new_pair = name_pair(&user);
        self.claim_name(new_pair.clone(), id)?;

        let previous = self.users.insert(id, user.clone());
        if let Some(previous) = previous {
            let old_pair = name_pair(&previous);
            if old_pair != new_pair {
                self.names.remove_if(&old_pair, |_, owner| *owner == id);
            }
        }
        Ok(user)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn save(&self, user: User) -> InfraResult<User> {
        match user.id {
            None => self.insert(user),
            Some(id) => self.overwrite(id, user),
        }
    }

    async fn find_by_id(&self, id: UserId) -> InfraResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn exists_by_id(&self, id: UserId) -> InfraResult<bool> {
        Ok(self.users.contains_key(&id))
    }

    async fn exists_by_name_pair(&self, first_name: &str, last_name: &str) -> InfraResult<bool> {
        Ok(self
            .names
            .contains_key(&(first_name.to_string(), last_name.to_string())))
    }

    async fn count(&self) -> InfraResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn delete_by_id(&self, id: UserId) -> InfraResult<()> {
        if let Some((_, removed)) = self.users.remove(&id) {
            self.names.remove_if(&name_pair(&removed), |_, owner| *owner == id);
        }
        Ok(())
    }
}
