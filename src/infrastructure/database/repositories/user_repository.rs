use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use tracing::debug;

use crate::domain::{User, UserId, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;
use crate::shared::{InfraError, InfraResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: Some(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        contact_number: model.contact_number,
    }
}

fn write_err(e: DbErr) -> InfraError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => InfraError::UniqueViolation(detail),
        _ => InfraError::Database(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn save(&self, u: User) -> InfraResult<User> {
        let model = user::ActiveModel {
            id: u.id.map_or(NotSet, Set),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            contact_number: Set(u.contact_number),
        };

        let saved = if u.id.is_some() {
            model.update(&self.db).await
        } else {
            model.insert(&self.db).await
        }
        .map_err(write_err)?;

        debug!(user_id = saved.id, "User row written");
        Ok(user_model_to_domain(saved))
    }

    async fn find_by_id(&self, id: UserId) -> InfraResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn exists_by_id(&self, id: UserId) -> InfraResult<bool> {
        let count = user::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn exists_by_name_pair(&self, first_name: &str, last_name: &str) -> InfraResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::FirstName.eq(first_name))
            .filter(user::Column::LastName.eq(last_name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self) -> InfraResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: UserId) -> InfraResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(user_id = id, rows = result.rows_affected, "User row deleted");
        Ok(())
    }
}
