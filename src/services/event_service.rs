//! Event service - Handles event-related business logic.
//!
//! Every mutation resolves the event first (missing events are NotFound,
//! never Forbidden) and passes the ownership check before anything is
//! persisted.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Event, EventFilter, EventSort, EventStatus, EventUpdate, NewEvent};
use crate::errors::{AppError, AppResult};
use crate::infra::{EventRepository, UserRepository};
use crate::types::PageParams;

/// Event service trait for dependency injection.
///
/// Listing methods return the page slice together with the total number
/// of matching rows.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Create a new event owned by `user_id`; unset status defaults to DRAFT
    async fn create_event(&self, data: NewEvent, user_id: Uuid) -> AppResult<Event>;

    /// Get event by ID
    async fn get_event(&self, id: Uuid) -> AppResult<Event>;

    /// List events matching the optional criteria, sorted and paginated
    async fn list_events(
        &self,
        filter: EventFilter,
        params: PageParams,
        sort: EventSort,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List events created by the given user
    async fn list_events_by_user(
        &self,
        user_id: Uuid,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List events with the given status
    async fn list_events_by_status(
        &self,
        status: EventStatus,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List published events that lie in the future, soonest first
    async fn list_upcoming_published(&self, params: PageParams) -> AppResult<(Vec<Event>, u64)>;

    /// Replace the mutable fields of an event; owner only
    async fn update_event(
        &self,
        id: Uuid,
        update: EventUpdate,
        user_id: Uuid,
    ) -> AppResult<Event>;

    /// Change only the status of an event; owner only
    async fn update_event_status(
        &self,
        id: Uuid,
        status: EventStatus,
        user_id: Uuid,
    ) -> AppResult<Event>;

    /// Delete an event; owner only
    async fn delete_event(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;
}

/// Gate mutation on the caller being the event's creator.
fn check_ownership(event: &Event, user_id: Uuid, action: &str) -> AppResult<()> {
    if event.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "You are not allowed to {} this event",
            action
        )))
    }
}

/// Concrete implementation of EventService using repositories.
pub struct EventManager {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
}

impl EventManager {
    /// Create new event service instance with repositories
    pub fn new(events: Arc<dyn EventRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { events, users }
    }

    async fn load_event(&self, id: Uuid) -> AppResult<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event with id {} not found", id)))
    }
}

#[async_trait]
impl EventService for EventManager {
    async fn create_event(&self, data: NewEvent, user_id: Uuid) -> AppResult<Event> {
        // The owner must resolve before anything is written
        let owner = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id {} not found", user_id)))?;

        let event = Event::new(Uuid::new_v4(), data, owner.id, owner.username, Utc::now());
        self.events.insert(&event).await?;

        tracing::info!(event_id = %event.id, owner = %event.created_by_username, "Event created");
        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> AppResult<Event> {
        self.load_event(id).await
    }

    async fn list_events(
        &self,
        filter: EventFilter,
        params: PageParams,
        sort: EventSort,
    ) -> AppResult<(Vec<Event>, u64)> {
        // Fast path: a plain listing never constructs a filter predicate
        if filter.is_empty() {
            self.events.list(params, sort).await
        } else {
            self.events.list_filtered(filter, params, sort).await
        }
    }

    async fn list_events_by_user(
        &self,
        user_id: Uuid,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        self.events.list_by_creator(user_id, params).await
    }

    async fn list_events_by_status(
        &self,
        status: EventStatus,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        self.events.list_by_status(status, params).await
    }

    async fn list_upcoming_published(&self, params: PageParams) -> AppResult<(Vec<Event>, u64)> {
        self.events.list_published_after(Utc::now(), params).await
    }

    async fn update_event(
        &self,
        id: Uuid,
        update: EventUpdate,
        user_id: Uuid,
    ) -> AppResult<Event> {
        let mut event = self.load_event(id).await?;
        check_ownership(&event, user_id, "update")?;

        event.apply_update(update, Utc::now());
        self.events.update(&event).await?;

        Ok(event)
    }

    async fn update_event_status(
        &self,
        id: Uuid,
        status: EventStatus,
        user_id: Uuid,
    ) -> AppResult<Event> {
        let mut event = self.load_event(id).await?;
        check_ownership(&event, user_id, "change the status of")?;

        event.set_status(status, Utc::now());
        self.events.update(&event).await?;

        Ok(event)
    }

    async fn delete_event(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let event = self.load_event(id).await?;
        check_ownership(&event, user_id, "delete")?;

        self.events.delete(event.id).await?;
        tracing::info!(event_id = %event.id, "Event deleted");
        Ok(())
    }
}
