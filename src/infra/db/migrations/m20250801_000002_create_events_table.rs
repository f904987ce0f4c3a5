//! Migration: Create the events table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(
                        ColumnDef::new(Events::EventDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Location).string().not_null())
                    .col(ColumnDef::new(Events::Status).string().not_null())
                    .col(ColumnDef::new(Events::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_user_id")
                            .from(Events::Table, Events::UserId)
                            .to(Users::Table, Users::Id)
                            // Users owning events must not disappear under them
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_user_id")
                    .table(Events::Table)
                    .col(Events::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;

        // Range filters and upcoming listings both scan by date
        manager
            .create_index(
                Index::create()
                    .name("idx_events_event_date")
                    .table(Events::Table)
                    .col(Events::EventDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_event_date")
                    .table(Events::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_user_id")
                    .table(Events::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    EventDate,
    Location,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
