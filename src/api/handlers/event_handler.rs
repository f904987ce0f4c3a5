//! Event handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::{
    Event, EventFilter, EventResponse, EventSort, EventStatus, EventUpdate, NewEvent,
};
use crate::errors::AppResult;
use crate::types::{EventPageResponse, PageParams, PageResponse};

/// Query parameters for the filtered event listing
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default = "default_sort_by", rename = "sortBy")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir", rename = "sortDir")]
    pub sort_dir: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    #[serde(rename = "fromDate")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(rename = "toDate")]
    pub to_date: Option<DateTime<Utc>>,
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

/// Actor identifier supplied by mutating requests
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Query parameters for the status-only update
#[derive(Debug, Deserialize)]
pub struct StatusChangeQuery {
    pub status: EventStatus,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Event creation/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Event title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[schema(example = "Launch party")]
    pub title: String,
    /// Optional longer description
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
    /// Scheduled date and time; must lie in the future
    #[validate(custom(function = validate_future_date))]
    pub event_date: DateTime<Utc>,
    /// Where the event takes place
    #[validate(length(min = 1, max = 200, message = "Location must be between 1 and 200 characters"))]
    #[schema(example = "HQ")]
    pub location: String,
    /// Initial status; defaults to DRAFT when omitted
    pub status: Option<EventStatus>,
}

fn validate_future_date(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value > Utc::now() {
        Ok(())
    } else {
        let mut error = ValidationError::new("future");
        error.message = Some("Event date must be in the future".into());
        Err(error)
    }
}

impl From<EventPayload> for NewEvent {
    fn from(payload: EventPayload) -> Self {
        NewEvent {
            title: payload.title,
            description: payload.description,
            event_date: payload.event_date,
            location: payload.location,
            status: payload.status,
        }
    }
}

impl From<EventPayload> for EventUpdate {
    fn from(payload: EventPayload) -> Self {
        EventUpdate {
            title: payload.title,
            description: payload.description,
            event_date: payload.event_date,
            location: payload.location,
            status: payload.status.unwrap_or_default(),
        }
    }
}

/// Map a fetched slice plus its total into the page descriptor.
fn to_page(events: Vec<Event>, total: u64, params: PageParams) -> PageResponse<EventResponse> {
    PageResponse::new(
        events.into_iter().map(EventResponse::from).collect(),
        params.page,
        params.limit(),
        total,
    )
}

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/upcoming", get(list_upcoming_events))
        .route("/user/:user_id", get(list_events_by_user))
        .route("/status/:status", get(list_events_by_status))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/:id/status", patch(update_event_status))
}

/// List events with optional filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    params(
        ("page" = Option<u64>, Query, description = "0-indexed page number"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sortBy" = Option<String>, Query, description = "Sort field"),
        ("sortDir" = Option<String>, Query, description = "asc or desc"),
        ("title" = Option<String>, Query, description = "Title substring, case-insensitive"),
        ("location" = Option<String>, Query, description = "Location substring, case-insensitive"),
        ("status" = Option<EventStatus>, Query, description = "Exact status"),
        ("fromDate" = Option<String>, Query, description = "Inclusive lower event date bound (RFC 3339)"),
        ("toDate" = Option<String>, Query, description = "Inclusive upper event date bound (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Page of events", body = EventPageResponse),
        (status = 400, description = "Unknown sort field")
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(q): Query<ListEventsQuery>,
) -> AppResult<Json<PageResponse<EventResponse>>> {
    let sort = EventSort::parse(&q.sort_by, &q.sort_dir)?;
    let params = PageParams::new(q.page, q.size);
    let filter = EventFilter {
        title: q.title,
        location: q.location,
        status: q.status,
        from_date: q.from_date,
        to_date: q.to_date,
    };

    let (events, total) = state.event_service.list_events(filter, params, sort).await?;
    Ok(Json(to_page(events, total, params)))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EventResponse>> {
    let event = state.event_service.get_event(id).await?;
    Ok(Json(EventResponse::from(event)))
}

/// List events created by a user
#[utoipa::path(
    get,
    path = "/api/events/user/{userId}",
    tag = "Events",
    params(
        ("userId" = Uuid, Path, description = "Creator's user ID"),
        ("page" = Option<u64>, Query, description = "0-indexed page number"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of the user's events", body = EventPageResponse)
    )
)]
pub async fn list_events_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<EventResponse>>> {
    let (events, total) = state
        .event_service
        .list_events_by_user(user_id, params)
        .await?;
    Ok(Json(to_page(events, total, params)))
}

/// List events with a given status
#[utoipa::path(
    get,
    path = "/api/events/status/{status}",
    tag = "Events",
    params(
        ("status" = EventStatus, Path, description = "Event status"),
        ("page" = Option<u64>, Query, description = "0-indexed page number"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of events", body = EventPageResponse)
    )
)]
pub async fn list_events_by_status(
    State(state): State<AppState>,
    Path(status): Path<EventStatus>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<EventResponse>>> {
    let (events, total) = state
        .event_service
        .list_events_by_status(status, params)
        .await?;
    Ok(Json(to_page(events, total, params)))
}

/// List upcoming published events, soonest first
#[utoipa::path(
    get,
    path = "/api/events/upcoming",
    tag = "Events",
    params(
        ("page" = Option<u64>, Query, description = "0-indexed page number"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of upcoming published events", body = EventPageResponse)
    )
)]
pub async fn list_upcoming_events(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<EventResponse>>> {
    let (events, total) = state.event_service.list_upcoming_published(params).await?;
    Ok(Json(to_page(events, total, params)))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    params(
        ("userId" = Uuid, Query, description = "ID of the creating user")
    ),
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Creating user not found")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(payload): ValidatedJson<EventPayload>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    let event = state
        .event_service
        .create_event(payload.into(), actor.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// Update an event (owner only)
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("userId" = Uuid, Query, description = "ID of the acting user")
    ),
    request_body = EventPayload,
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Acting user is not the creator"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
    ValidatedJson(payload): ValidatedJson<EventPayload>,
) -> AppResult<Json<EventResponse>> {
    let event = state
        .event_service
        .update_event(id, payload.into(), actor.user_id)
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// Change only the status of an event (owner only)
#[utoipa::path(
    patch,
    path = "/api/events/{id}/status",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("status" = EventStatus, Query, description = "New status"),
        ("userId" = Uuid, Query, description = "ID of the acting user")
    ),
    responses(
        (status = 200, description = "Status updated successfully", body = EventResponse),
        (status = 403, description = "Acting user is not the creator"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<StatusChangeQuery>,
) -> AppResult<Json<EventResponse>> {
    let event = state
        .event_service
        .update_event_status(id, q.status, q.user_id)
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// Delete an event (owner only)
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("userId" = Uuid, Query, description = "ID of the acting user")
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 403, description = "Acting user is not the creator"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> AppResult<StatusCode> {
    state.event_service.delete_event(id, actor.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
