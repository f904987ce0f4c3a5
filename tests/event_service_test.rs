//! Event service unit tests.
//!
//! Covers ownership gating, existence-before-ownership ordering, the
//! status default, and the filter fast path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use event_api::domain::{
    Event, EventFilter, EventSort, EventStatus, EventUpdate, NewEvent, NewUser, User, UserRole,
};
use event_api::errors::{AppError, AppResult};
use event_api::infra::{EventRepository, UserRepository};
use event_api::services::{EventManager, EventService};
use event_api::types::PageParams;

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn list(&self) -> AppResult<Vec<User>>;
        async fn exists_by_username(&self, username: &str) -> AppResult<bool>;
        async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
        async fn insert(&self, user: &User) -> AppResult<()>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
    }
}

mock! {
    pub EventRepo {}

    #[async_trait]
    impl EventRepository for EventRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;
        async fn list(&self, params: PageParams, sort: EventSort) -> AppResult<(Vec<Event>, u64)>;
        async fn list_filtered(
            &self,
            filter: EventFilter,
            params: PageParams,
            sort: EventSort,
        ) -> AppResult<(Vec<Event>, u64)>;
        async fn list_by_creator(
            &self,
            user_id: Uuid,
            params: PageParams,
        ) -> AppResult<(Vec<Event>, u64)>;
        async fn list_by_status(
            &self,
            status: EventStatus,
            params: PageParams,
        ) -> AppResult<(Vec<Event>, u64)>;
        async fn list_published_after(
            &self,
            instant: DateTime<Utc>,
            params: PageParams,
        ) -> AppResult<(Vec<Event>, u64)>;
        async fn count_by_creator(&self, user_id: Uuid) -> AppResult<u64>;
        async fn insert(&self, event: &Event) -> AppResult<()>;
        async fn update(&self, event: &Event) -> AppResult<()>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
    }
}

fn test_owner(id: Uuid) -> User {
    User::new(
        id,
        NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            role: UserRole::User,
        },
        Utc::now(),
    )
}

fn test_event(id: Uuid, owner: Uuid) -> Event {
    Event::new(
        id,
        NewEvent {
            title: "Launch".to_string(),
            description: None,
            event_date: Utc::now() + Duration::days(1),
            location: "HQ".to_string(),
            status: None,
        },
        owner,
        "alice".to_string(),
        Utc::now(),
    )
}

fn test_update() -> EventUpdate {
    EventUpdate {
        title: "Renamed".to_string(),
        description: Some("details".to_string()),
        event_date: Utc::now() + Duration::days(2),
        location: "Offsite".to_string(),
        status: EventStatus::Published,
    }
}

fn service(events: MockEventRepo, users: MockUserRepo) -> EventManager {
    EventManager::new(Arc::new(events), Arc::new(users))
}

#[tokio::test]
async fn create_event_requires_existing_owner() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    // No insert expectation: nothing may be written for an unknown owner

    let result = service(MockEventRepo::new(), users)
        .create_event(
            NewEvent {
                title: "Launch".to_string(),
                description: None,
                event_date: Utc::now() + Duration::days(1),
                location: "HQ".to_string(),
                status: None,
            },
            Uuid::new_v4(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn create_event_defaults_to_draft_and_records_owner() {
    let owner_id = Uuid::new_v4();

    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .with(eq(owner_id))
        .returning(|id| Ok(Some(test_owner(id))));

    let mut events = MockEventRepo::new();
    events
        .expect_insert()
        .withf(move |event: &Event| {
            event.status == EventStatus::Draft
                && event.created_by == owner_id
                && event.created_by_username == "alice"
        })
        .times(1)
        .returning(|_| Ok(()));

    let result = service(events, users)
        .create_event(
            NewEvent {
                title: "Launch".to_string(),
                description: None,
                event_date: Utc::now() + Duration::days(1),
                location: "HQ".to_string(),
                status: None,
            },
            owner_id,
        )
        .await;

    let event = result.unwrap();
    assert_eq!(event.status, EventStatus::Draft);
    assert_eq!(event.created_by, owner_id);
}

#[tokio::test]
async fn create_event_keeps_requested_status() {
    let owner_id = Uuid::new_v4();

    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_owner(id))));

    let mut events = MockEventRepo::new();
    events.expect_insert().returning(|_| Ok(()));

    let result = service(events, users)
        .create_event(
            NewEvent {
                title: "Launch".to_string(),
                description: None,
                event_date: Utc::now() + Duration::days(1),
                location: "HQ".to_string(),
                status: Some(EventStatus::Published),
            },
            owner_id,
        )
        .await;

    assert_eq!(result.unwrap().status, EventStatus::Published);
}

#[tokio::test]
async fn get_event_maps_absence_to_not_found() {
    let mut events = MockEventRepo::new();
    events.expect_find_by_id().returning(|_| Ok(None));

    let result = service(events, MockUserRepo::new())
        .get_event(Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden_and_writes_nothing() {
    let event_id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .with(eq(event_id))
        .returning(move |id| Ok(Some(test_event(id, owner))));
    // No update expectation: a write after the failed guard would panic

    let result = service(events, MockUserRepo::new())
        .update_event(event_id, test_update(), intruder)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn missing_event_reports_not_found_before_ownership() {
    let mut events = MockEventRepo::new();
    events.expect_find_by_id().returning(|_| Ok(None));

    // The actor id is irrelevant here: existence is resolved first
    let result = service(events, MockUserRepo::new())
        .update_event(Uuid::new_v4(), test_update(), Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn owner_update_replaces_fields_but_not_creator() {
    let event_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_event(id, owner))));
    events
        .expect_update()
        .withf(move |event: &Event| {
            event.title == "Renamed"
                && event.status == EventStatus::Published
                && event.created_by == owner
        })
        .times(1)
        .returning(|_| Ok(()));

    let result = service(events, MockUserRepo::new())
        .update_event(event_id, test_update(), owner)
        .await;

    let event = result.unwrap();
    assert_eq!(event.location, "Offsite");
    assert_eq!(event.created_by, owner);
}

#[tokio::test]
async fn status_change_touches_only_status() {
    let event_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_event(id, owner))));
    events
        .expect_update()
        .withf(|event: &Event| {
            event.status == EventStatus::Published && event.title == "Launch"
        })
        .times(1)
        .returning(|_| Ok(()));

    let result = service(events, MockUserRepo::new())
        .update_event_status(event_id, EventStatus::Published, owner)
        .await;

    assert_eq!(result.unwrap().status, EventStatus::Published);
}

#[tokio::test]
async fn status_change_by_non_owner_is_forbidden() {
    let owner = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_event(id, owner))));

    let result = service(events, MockUserRepo::new())
        .update_event_status(Uuid::new_v4(), EventStatus::Cancelled, Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let owner = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_event(id, owner))));

    let result = service(events, MockUserRepo::new())
        .delete_event(Uuid::new_v4(), Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn delete_by_owner_removes_the_event() {
    let event_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_event(id, owner))));
    events
        .expect_delete()
        .with(eq(event_id))
        .times(1)
        .returning(|_| Ok(()));

    let result = service(events, MockUserRepo::new())
        .delete_event(event_id, owner)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn empty_filter_takes_the_plain_listing_path() {
    let mut events = MockEventRepo::new();
    events
        .expect_list()
        .times(1)
        .returning(|_, _| Ok((vec![], 0)));
    // No list_filtered expectation: the predicate path must not be taken

    let result = service(events, MockUserRepo::new())
        .list_events(
            EventFilter::default(),
            PageParams::default(),
            EventSort::by_event_date_asc(),
        )
        .await;

    assert_eq!(result.unwrap().1, 0);
}

#[tokio::test]
async fn any_set_criterion_takes_the_filtered_path() {
    let mut events = MockEventRepo::new();
    events
        .expect_list_filtered()
        .withf(|filter: &EventFilter, _, _| filter.status == Some(EventStatus::Published))
        .times(1)
        .returning(|_, _, _| Ok((vec![], 0)));

    let filter = EventFilter {
        status: Some(EventStatus::Published),
        ..Default::default()
    };
    let result = service(events, MockUserRepo::new())
        .list_events(filter, PageParams::default(), EventSort::by_event_date_asc())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn upcoming_listing_queries_published_events_after_now() {
    let before = Utc::now();

    let mut events = MockEventRepo::new();
    events
        .expect_list_published_after()
        .withf(move |instant, _| *instant >= before)
        .times(1)
        .returning(|_, _| Ok((vec![], 0)));

    let result = service(events, MockUserRepo::new())
        .list_upcoming_published(PageParams::default())
        .await;

    assert!(result.is_ok());
}
