//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories over the SeaORM entities

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{EventRepository, EventStore, UserRepository, UserStore};
