//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{event_handler, user_handler};
use crate::domain::{EventResponse, EventStatus, UserResponse, UserRole};
use crate::types::EventPageResponse;

/// OpenAPI documentation for the Event API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event API",
        version = "0.1.0",
        description = "REST backend for managing users and events, with filtered and paginated event search",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::get_user_by_username,
        user_handler::create_user,
        user_handler::delete_user,
        user_handler::user_exists,
        // Event endpoints
        event_handler::list_events,
        event_handler::get_event,
        event_handler::list_events_by_user,
        event_handler::list_events_by_status,
        event_handler::list_upcoming_events,
        event_handler::create_event,
        event_handler::update_event,
        event_handler::update_event_status,
        event_handler::delete_event,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            EventStatus,
            EventResponse,
            EventPageResponse,
            // Request types
            user_handler::UserPayload,
            event_handler::EventPayload,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Events", description = "Event management and search operations")
    )
)]
pub struct ApiDoc;
