use crate::m20250601_000001_create_crew_table::Crew;
use crate::m20250601_000002_create_flights_table::Flights;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rosters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rosters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rosters::CrewId).big_integer().not_null())
                    .col(ColumnDef::new(Rosters::FlightId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Rosters::Start)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rosters::End)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rosters::Position).string_len(32))
                    .col(ColumnDef::new(Rosters::Attributes).json().not_null())
                    .col(
                        ColumnDef::new(Rosters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rosters_x_crew")
                            .from(Rosters::Table, Rosters::CrewId)
                            .to(Crew::Table, Crew::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rosters_x_flights")
                            .from(Rosters::Table, Rosters::FlightId)
                            .to(Flights::Table, Flights::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_crew_flight")
                    .table(Rosters::Table)
                    .col(Rosters::CrewId)
                    .col(Rosters::FlightId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rosters_flight_id")
                    .table(Rosters::Table)
                    .col(Rosters::FlightId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rosters_start")
                    .table(Rosters::Table)
                    .col(Rosters::Start)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rosters::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Rosters {
    Table,
    Id,
    CrewId,
    FlightId,
    Start,
    End,
    Position,
    Attributes,
    CreatedAt,
}
