//! Event repository implementation.
//!
//! Holds the filtered/paginated query construction for event listings.
//! All reads join the owning user so the domain entity carries the
//! creator's username.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use uuid::Uuid;

use super::entities::event::{self, ActiveModel, Entity as EventEntity};
use super::entities::user;
use crate::domain::{Event, EventFilter, EventSort, EventSortField, EventStatus, SortDirection};
use crate::errors::{AppError, AppResult};
use crate::types::PageParams;

#[cfg(test)]
use mockall::automock;

/// Event repository trait for dependency injection.
///
/// Listing methods return the page slice together with the total number
/// of matching rows.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// List all events, sorted and paginated (no filter predicate)
    async fn list(&self, params: PageParams, sort: EventSort) -> AppResult<(Vec<Event>, u64)>;

    /// List events matching the given criteria, sorted and paginated
    async fn list_filtered(
        &self,
        filter: EventFilter,
        params: PageParams,
        sort: EventSort,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List events created by the given user
    async fn list_by_creator(
        &self,
        user_id: Uuid,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List events with the given status
    async fn list_by_status(
        &self,
        status: EventStatus,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List published events strictly after `instant`, soonest first
    async fn list_published_after(
        &self,
        instant: DateTime<Utc>,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// Count events created by the given user
    async fn count_by_creator(&self, user_id: Uuid) -> AppResult<u64>;

    /// Persist a new event
    async fn insert(&self, event: &Event) -> AppResult<()>;

    /// Persist all mutable fields of an existing event
    async fn update(&self, event: &Event) -> AppResult<()>;

    /// Delete event by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Flat row shape produced by the events/users join
#[derive(Debug, FromQueryResult)]
struct EventRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    event_date: DateTime<Utc>,
    location: String,
    status: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by_username: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            location: row.location,
            status: EventStatus::from(row.status.as_str()),
            created_by: row.user_id,
            created_by_username: row.created_by_username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Base select: events joined with their creator's username
fn with_creator() -> Select<EventEntity> {
    EventEntity::find()
        .column_as(user::Column::Username, "created_by_username")
        .join(JoinType::InnerJoin, event::Relation::User.def())
}

/// Build the conjunctive filter predicate.
///
/// Absent title/location degrade to an ILIKE against the empty string
/// (matches every row); status and date bounds are added only when set.
fn filter_condition(filter: &EventFilter) -> Condition {
    let title = filter.title.as_deref().unwrap_or("").trim().to_string();
    let location = filter.location.as_deref().unwrap_or("").trim().to_string();

    let mut condition = Condition::all()
        .add(Expr::col((EventEntity, event::Column::Title)).ilike(format!("%{}%", title)))
        .add(Expr::col((EventEntity, event::Column::Location)).ilike(format!("%{}%", location)));

    if let Some(status) = filter.status {
        condition = condition.add(event::Column::Status.eq(status.as_str()));
    }
    if let Some(from_date) = filter.from_date {
        condition = condition.add(event::Column::EventDate.gte(from_date));
    }
    if let Some(to_date) = filter.to_date {
        condition = condition.add(event::Column::EventDate.lte(to_date));
    }

    condition
}

fn sort_column(field: EventSortField) -> event::Column {
    match field {
        EventSortField::Id => event::Column::Id,
        EventSortField::Title => event::Column::Title,
        EventSortField::EventDate => event::Column::EventDate,
        EventSortField::Location => event::Column::Location,
        EventSortField::Status => event::Column::Status,
        EventSortField::CreatedAt => event::Column::CreatedAt,
        EventSortField::UpdatedAt => event::Column::UpdatedAt,
    }
}

fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run a paginated select, returning the requested page and the total
    /// number of matching rows.
    async fn page(
        &self,
        query: Select<EventEntity>,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        let paginator = query
            .into_model::<EventRow>()
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page)
            .await
            .map_err(AppError::from)?;

        Ok((rows.into_iter().map(Event::from).collect(), total))
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let row = with_creator()
            .filter(event::Column::Id.eq(id))
            .into_model::<EventRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(Event::from))
    }

    async fn list(&self, params: PageParams, sort: EventSort) -> AppResult<(Vec<Event>, u64)> {
        let query = with_creator().order_by(sort_column(sort.field), order_of(sort.direction));
        self.page(query, params).await
    }

    async fn list_filtered(
        &self,
        filter: EventFilter,
        params: PageParams,
        sort: EventSort,
    ) -> AppResult<(Vec<Event>, u64)> {
        let query = with_creator()
            .filter(filter_condition(&filter))
            .order_by(sort_column(sort.field), order_of(sort.direction));
        self.page(query, params).await
    }

    async fn list_by_creator(
        &self,
        user_id: Uuid,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        let query = with_creator().filter(event::Column::UserId.eq(user_id));
        self.page(query, params).await
    }

    async fn list_by_status(
        &self,
        status: EventStatus,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        let query = with_creator().filter(event::Column::Status.eq(status.as_str()));
        self.page(query, params).await
    }

    async fn list_published_after(
        &self,
        instant: DateTime<Utc>,
        params: PageParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        let query = with_creator()
            .filter(event::Column::Status.eq(EventStatus::Published.as_str()))
            .filter(event::Column::EventDate.gt(instant))
            .order_by(event::Column::EventDate, Order::Asc);
        self.page(query, params).await
    }

    async fn count_by_creator(&self, user_id: Uuid) -> AppResult<u64> {
        EventEntity::find()
            .filter(event::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn insert(&self, event: &Event) -> AppResult<()> {
        ActiveModel::from(event)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn update(&self, event: &Event) -> AppResult<()> {
        ActiveModel::from(event)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    AppError::not_found(format!("Event with id {} not found", event.id))
                }
                other => AppError::from(other),
            })?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = EventEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!(
                "Event with id {} not found",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    fn filtered_sql(filter: &EventFilter) -> String {
        with_creator()
            .filter(filter_condition(filter))
            .build(DatabaseBackend::Postgres)
            .to_string()
    }

    #[test]
    fn missing_text_filters_degrade_to_match_all() {
        let sql = filtered_sql(&EventFilter::default());
        // Both substring matches are always present, with empty patterns
        assert!(sql.contains(r#""events"."title" ILIKE '%%'"#), "{sql}");
        assert!(sql.contains(r#""events"."location" ILIKE '%%'"#), "{sql}");
        // Optional criteria are skipped entirely when unset
        assert!(!sql.contains(r#""status" ="#), "{sql}");
        assert!(!sql.contains(">="), "{sql}");
    }

    #[test]
    fn text_filters_are_trimmed_into_patterns() {
        let sql = filtered_sql(&EventFilter {
            title: Some("  Launch ".to_string()),
            location: Some("HQ".to_string()),
            ..Default::default()
        });
        assert!(sql.contains("'%Launch%'"), "{sql}");
        assert!(sql.contains("'%HQ%'"), "{sql}");
    }

    #[test]
    fn optional_criteria_apply_independently() {
        let now = Utc::now();
        let sql = filtered_sql(&EventFilter {
            status: Some(EventStatus::Published),
            from_date: Some(now),
            to_date: Some(now),
            ..Default::default()
        });
        assert!(sql.contains(r#""events"."status" = 'PUBLISHED'"#), "{sql}");
        assert!(sql.contains(r#""events"."event_date" >="#), "{sql}");
        assert!(sql.contains(r#""events"."event_date" <="#), "{sql}");
    }

    #[test]
    fn inverted_date_range_still_builds_both_bounds() {
        // fromDate > toDate is not an error; the conjunction simply cannot
        // match any row and yields an empty page.
        let from = Utc::now();
        let to = from - chrono::Duration::days(1);
        let sql = filtered_sql(&EventFilter {
            from_date: Some(from),
            to_date: Some(to),
            ..Default::default()
        });
        assert!(sql.contains(">="), "{sql}");
        assert!(sql.contains("<="), "{sql}");
    }

    #[test]
    fn reads_join_the_creator_username() {
        let sql = with_creator()
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(
            sql.contains(r#""users"."username" AS "created_by_username""#),
            "{sql}"
        );
        assert!(sql.contains("INNER JOIN \"users\""), "{sql}");
    }

    #[test]
    fn sort_fields_map_to_event_columns() {
        use sea_orm::sea_query::Iden;

        assert_eq!(sort_column(EventSortField::EventDate).to_string(), "event_date");
        assert_eq!(sort_column(EventSortField::CreatedAt).to_string(), "created_at");
        assert_eq!(sort_column(EventSortField::Id).to_string(), "id");
    }
}
