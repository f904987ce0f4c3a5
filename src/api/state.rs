//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services. Constructed
//! once at startup and cloned into every handler.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{EventService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Event service
    pub event_service: Arc<dyn EventService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection.
    pub fn from_config(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.connection().clone());

        Self {
            user_service: container.users(),
            event_service: container.events(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        event_service: Arc<dyn EventService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            event_service,
            database,
        }
    }
}
