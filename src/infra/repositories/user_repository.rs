//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Check whether a user with the given username exists
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Check whether a user with the given email exists
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Persist a new user
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Delete user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("User with id {} not found", id)));
        }

        Ok(())
    }
}
