use sea_orm::entity::prelude::*;

use serde::{Deserialize, Serialize};

/// One crew member on one flight for the duty window `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "rosters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub crew_id: i64,
    pub flight_id: String,
    pub start: DateTimeUtc,
    pub end: DateTimeUtc,
    pub position: Option<String>,
    pub attributes: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::crew::Entity",
        from = "crate::roster_assignment::Column::CrewId",
        to = "crate::crew::Column::Id",
        on_delete = "Cascade"
    )]
    Crew,

    #[sea_orm(
        belongs_to = "crate::flight::Entity",
        from = "crate::roster_assignment::Column::FlightId",
        to = "crate::flight::Column::Id",
        on_delete = "Cascade"
    )]
    Flight,
}

impl Related<crate::crew::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crew.def()
    }
}

impl Related<crate::flight::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flight.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
