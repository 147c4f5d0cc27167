use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flights::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Flights::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flights::FlightNumber).string_len(32).not_null())
                    .col(ColumnDef::new(Flights::Origin).string_len(10).not_null())
                    .col(ColumnDef::new(Flights::Destination).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Flights::Departure)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Flights::Arrival)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Flights::Aircraft).string_len(50))
                    .col(ColumnDef::new(Flights::Attributes).json().not_null())
                    .col(
                        ColumnDef::new(Flights::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Flights::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flights_departure")
                    .table(Flights::Table)
                    .col(Flights::Departure)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flights::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum Flights {
    Table,
    Id,
    FlightNumber,
    Origin,
    Destination,
    Departure,
    Arrival,
    Aircraft,
    Attributes,
    CreatedAt,
    UpdatedAt,
}
