//! Event database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Event;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub event_date: DateTimeUtc,
    pub location: String,
    pub status: String,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert domain entity to a fully-set active model for persistence.
///
/// The creator's username lives on the users table and is only joined in
/// on reads, so it has no column here.
impl From<&Event> for ActiveModel {
    fn from(event: &Event) -> Self {
        ActiveModel {
            id: Set(event.id),
            title: Set(event.title.clone()),
            description: Set(event.description.clone()),
            event_date: Set(event.event_date),
            location: Set(event.location.clone()),
            status: Set(event.status.to_string()),
            user_id: Set(event.created_by),
            created_at: Set(event.created_at),
            updated_at: Set(event.updated_at),
        }
    }
}
