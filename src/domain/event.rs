//! Event domain entity, filters, and sorting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Event lifecycle status.
///
/// No transition graph is enforced: the owner may move an event between
/// any two statuses at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::Cancelled => "CANCELLED",
            EventStatus::Completed => "COMPLETED",
        }
    }
}

impl From<&str> for EventStatus {
    fn from(s: &str) -> Self {
        match s {
            "PUBLISHED" => EventStatus::Published,
            "CANCELLED" => EventStatus::Cancelled,
            "COMPLETED" => EventStatus::Completed,
            _ => EventStatus::Draft,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event domain entity.
///
/// `created_by` is fixed at creation and never changed by updates.
/// `created_by_username` is resolved from the owning user on read so
/// responses can show who created the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub status: EventStatus,
    pub created_by: Uuid,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Construct a new event owned by `created_by`.
    ///
    /// An unset status defaults to `Draft`. Both timestamps start at `now`.
    pub fn new(
        id: Uuid,
        data: NewEvent,
        created_by: Uuid,
        created_by_username: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            event_date: data.event_date,
            location: data.location,
            status: data.status.unwrap_or_default(),
            created_by,
            created_by_username,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `user_id` is the creator of this event
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    /// Replace the mutable fields; the creator is left untouched.
    pub fn apply_update(&mut self, update: EventUpdate, now: DateTime<Utc>) {
        self.title = update.title;
        self.description = update.description;
        self.event_date = update.event_date;
        self.location = update.location;
        self.status = update.status;
        self.updated_at = now;
    }

    /// Status-only variant of [`Event::apply_update`]
    pub fn set_status(&mut self, status: EventStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

/// Event creation data, validated at the API boundary
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub status: Option<EventStatus>,
}

/// Full-replacement update for an existing event
#[derive(Debug, Clone)]
pub struct EventUpdate {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub status: EventStatus,
}

/// Optional search criteria for event listings, applied conjunctively.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Case-insensitive substring match on the location
    pub location: Option<String>,
    /// Exact status match
    pub status: Option<EventStatus>,
    /// Inclusive lower bound on the event date
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the event date
    pub to_date: Option<DateTime<Utc>>,
}

impl EventFilter {
    /// True when no criterion is set; listings then skip predicate
    /// construction entirely.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, |t| t.trim().is_empty())
            && self
                .location
                .as_deref()
                .map_or(true, |l| l.trim().is_empty())
            && self.status.is_none()
            && self.from_date.is_none()
            && self.to_date.is_none()
    }
}

/// Sortable event attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSortField {
    Id,
    Title,
    EventDate,
    Location,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl EventSortField {
    /// Parse a wire-format field name, failing fast on unknown attributes.
    pub fn parse(field: &str) -> AppResult<Self> {
        match field {
            "id" => Ok(EventSortField::Id),
            "title" => Ok(EventSortField::Title),
            "eventDate" => Ok(EventSortField::EventDate),
            "location" => Ok(EventSortField::Location),
            "status" => Ok(EventSortField::Status),
            "createdAt" => Ok(EventSortField::CreatedAt),
            "updatedAt" => Ok(EventSortField::UpdatedAt),
            other => Err(AppError::validation(format!(
                "Cannot sort by '{}'; sortable fields are id, title, eventDate, \
                 location, status, createdAt, updatedAt",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any casing) sorts descending; everything else ascending.
    pub fn parse(dir: &str) -> Self {
        if dir.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Requested ordering for event listings
#[derive(Debug, Clone, Copy)]
pub struct EventSort {
    pub field: EventSortField,
    pub direction: SortDirection,
}

impl EventSort {
    pub fn parse(field: &str, direction: &str) -> AppResult<Self> {
        Ok(Self {
            field: EventSortField::parse(field)?,
            direction: SortDirection::parse(direction),
        })
    }

    /// Ascending by event date; used for upcoming-event listings.
    pub fn by_event_date_asc() -> Self {
        Self {
            field: EventSortField::EventDate,
            direction: SortDirection::Asc,
        }
    }
}

/// Event response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    #[schema(example = "Launch party")]
    pub title: String,
    pub description: Option<String>,
    /// Scheduled date and time of the event
    pub event_date: DateTime<Utc>,
    #[schema(example = "HQ")]
    pub location: String,
    pub status: EventStatus,
    /// Identifier of the creating user
    pub created_by_id: Uuid,
    /// Username of the creating user
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            status: event.status,
            created_by_id: event.created_by,
            created_by_username: event.created_by_username,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_event(created_by: Uuid) -> Event {
        Event::new(
            Uuid::new_v4(),
            NewEvent {
                title: "Launch".to_string(),
                description: None,
                event_date: Utc::now() + Duration::days(1),
                location: "HQ".to_string(),
                status: None,
            },
            created_by,
            "alice".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn status_defaults_to_draft() {
        let event = sample_event(Uuid::new_v4());
        assert_eq!(event.status, EventStatus::Draft);
    }

    #[test]
    fn status_string_round_trip() {
        for status in [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::Cancelled,
            EventStatus::Completed,
        ] {
            assert_eq!(EventStatus::from(status.as_str()), status);
        }
        // Unknown strings fall back to Draft
        assert_eq!(EventStatus::from("ARCHIVED"), EventStatus::Draft);
    }

    #[test]
    fn ownership_check() {
        let owner = Uuid::new_v4();
        let event = sample_event(owner);
        assert!(event.is_owned_by(owner));
        assert!(!event.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn update_never_touches_creator() {
        let owner = Uuid::new_v4();
        let mut event = sample_event(owner);
        let created_at = event.created_at;

        let now = Utc::now() + Duration::seconds(5);
        event.apply_update(
            EventUpdate {
                title: "Renamed".to_string(),
                description: Some("details".to_string()),
                event_date: Utc::now() + Duration::days(2),
                location: "Offsite".to_string(),
                status: EventStatus::Published,
            },
            now,
        );

        assert_eq!(event.created_by, owner);
        assert_eq!(event.created_at, created_at);
        assert_eq!(event.updated_at, now);
        assert_eq!(event.title, "Renamed");
        assert_eq!(event.status, EventStatus::Published);
    }

    #[test]
    fn filter_emptiness_ignores_blank_text() {
        assert!(EventFilter::default().is_empty());
        assert!(EventFilter {
            title: Some("   ".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!EventFilter {
            status: Some(EventStatus::Published),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn sort_field_parse_fails_fast() {
        assert!(EventSortField::parse("eventDate").is_ok());
        let err = EventSortField::parse("secretColumn").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn sort_direction_is_lenient() {
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
    }
}
