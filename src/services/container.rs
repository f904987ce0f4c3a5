//! Service Container - Centralized service access.
//!
//! All services are constructed once at process start from a single
//! database connection and passed around by reference; there is no
//! ambient global lookup.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{EventManager, EventService, UserManager, UserService};
use crate::infra::{EventRepository, EventStore, UserRepository, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    event_service: Arc<dyn EventService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(user_service: Arc<dyn UserService>, event_service: Arc<dyn EventService>) -> Self {
        Self {
            user_service,
            event_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let user_repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let event_repo: Arc<dyn EventRepository> = Arc::new(EventStore::new(db));

        let user_service = Arc::new(UserManager::new(user_repo.clone(), event_repo.clone()));
        let event_service = Arc::new(EventManager::new(event_repo, user_repo));

        Self {
            user_service,
            event_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }
}
