//! Seed command - Populates the development database.
//!
//! Ensures a default user exists so the event endpoints can be exercised
//! right after a fresh migration.

use crate::config::Config;
use crate::domain::{NewUser, UserRole};
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Seeding database...");

    let db = Database::connect_and_migrate(&config).await?;
    let services = Services::from_connection(db.connection().clone());
    let users = services.users();

    let exists = users.username_exists("test").await?;
    tracing::info!("User 'test' exists: {}", exists);

    if !exists {
        let user = users
            .create_user(NewUser {
                username: "test".to_string(),
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
                role: UserRole::User,
            })
            .await?;
        tracing::info!(user_id = %user.id, "Default user created");
    }

    let all = users.list_users().await?;
    tracing::info!("Total users in database: {}", all.len());

    Ok(())
}
