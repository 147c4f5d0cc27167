use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Disruptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Disruptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Disruptions::Type).string_len(80).not_null())
                    .col(ColumnDef::new(Disruptions::Severity).string_len(32).not_null())
                    .col(ColumnDef::new(Disruptions::Affected).json().not_null())
                    .col(ColumnDef::new(Disruptions::Attributes).json().not_null())
                    .col(
                        ColumnDef::new(Disruptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_disruptions_created_at")
                    .table(Disruptions::Table)
                    .col(Disruptions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Disruptions::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Disruptions {
    Table,
    Id,
    Type,
    Severity,
    Affected,
    Attributes,
    CreatedAt,
}
