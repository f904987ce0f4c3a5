//! User service - Handles user-related business logic.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{EventRepository, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user; username and email must both be unused
    async fn create_user(&self, data: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by username
    async fn get_user_by_username(&self, username: &str) -> AppResult<User>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Check whether a username is taken
    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    /// Check whether an email address is taken
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Delete a user; refused while the user still owns events
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repositories.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventRepository>,
}

impl UserManager {
    /// Create new user service instance with repositories
    pub fn new(users: Arc<dyn UserRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { users, events }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, data: NewUser) -> AppResult<User> {
        // Uniqueness pre-checks, naming the colliding field. The unique
        // indexes remain the backstop for creations racing past these.
        if self.users.exists_by_username(&data.username).await? {
            return Err(AppError::conflict(format!(
                "User with username '{}' already exists",
                data.username
            )));
        }
        if self.users.exists_by_email(&data.email).await? {
            return Err(AppError::conflict(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let user = User::new(Uuid::new_v4(), data, Utc::now());
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id {} not found", id)))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.users.find_by_username(username).await?.ok_or_else(|| {
            AppError::not_found(format!("User with username '{}' not found", username))
        })
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with email '{}' not found", email)))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        self.users.exists_by_username(username).await
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.users.exists_by_email(email).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id {} not found", id)))?;

        // Owned events keep their creator; refuse instead of cascading
        let owned = self.events.count_by_creator(user.id).await?;
        if owned > 0 {
            return Err(AppError::conflict(format!(
                "User '{}' still owns {} event(s) and cannot be deleted",
                user.username, owned
            )));
        }

        self.users.delete(user.id).await?;
        tracing::info!(user_id = %user.id, "User deleted");
        Ok(())
    }
}
