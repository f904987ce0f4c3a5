//! Database connection and migration management.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Handle to the relational store.
///
/// Cheap to clone; all clones share one underlying connection pool.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool against the configured database.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        tracing::debug!("Database connection established");
        Ok(Self { connection })
    }

    /// Open a connection pool and bring the schema up to date.
    pub async fn connect_and_migrate(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect(config).await?;
        Migrator::up(&db.connection, None).await?;
        tracing::info!("Schema is up to date");
        Ok(db)
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Apply all pending migrations.
    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Roll back the most recent migration.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Log the applied/pending state of every known migration.
    pub async fn migration_status(&self) -> Result<(), DbErr> {
        Migrator::status(&self.connection).await
    }

    /// Drop everything and re-run all migrations from scratch.
    pub async fn migrate_fresh(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check connectivity with a trivial round-trip query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
