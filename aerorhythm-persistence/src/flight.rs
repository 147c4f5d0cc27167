use sea_orm::entity::prelude::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    /// Carrier, number and date, e.g. `AI205-20250701`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTimeUtc,
    pub arrival: DateTimeUtc,
    pub aircraft: Option<String>,
    pub attributes: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    pub fn block_time(&self) -> chrono::Duration {
        self.arrival - self.departure
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::roster_assignment::Entity")]
    RosterAssignment,
}

impl Related<crate::roster_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
