//! Migrate command - applies or rolls back schema migrations.

use crate::cli::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are applied explicitly here, never on plain connect
    let db = Database::connect(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            db.migration_status().await?;
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.migrate_fresh().await?;
            tracing::info!("Database reset");
        }
    }

    Ok(())
}
