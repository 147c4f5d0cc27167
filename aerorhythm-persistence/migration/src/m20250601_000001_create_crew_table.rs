use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crew::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Crew::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Crew::EmployeeId)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Crew::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Crew::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Crew::Rank).string_len(16).not_null())
                    .col(ColumnDef::new(Crew::BaseAirport).string_len(10))
                    .col(ColumnDef::new(Crew::HireDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Crew::SeniorityNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Crew::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Crew::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Crew::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crew_base_airport")
                    .table(Crew::Table)
                    .col(Crew::BaseAirport)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Crew::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum Crew {
    Table,
    Id,
    EmployeeId,
    FirstName,
    LastName,
    Rank,
    BaseAirport,
    HireDate,
    SeniorityNumber,
    Status,
    CreatedAt,
    UpdatedAt,
}
