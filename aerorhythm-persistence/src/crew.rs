use sea_orm::entity::prelude::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum Rank {
    #[sea_orm(string_value = "CPT")]
    #[serde(rename = "CPT")]
    Captain,
    #[sea_orm(string_value = "FO")]
    #[serde(rename = "FO")]
    FirstOfficer,
    #[sea_orm(string_value = "SO")]
    #[serde(rename = "SO")]
    SecondOfficer,
    #[sea_orm(string_value = "PUR")]
    #[serde(rename = "PUR")]
    Purser,
    #[sea_orm(string_value = "FA")]
    #[serde(rename = "FA")]
    FlightAttendant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum CrewStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "on_leave")]
    OnLeave,
}

impl Default for CrewStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "crew")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub rank: Rank,
    pub base_airport: Option<String>,
    pub hire_date: Option<DateTimeUtc>,
    pub seniority_number: i32,
    pub status: CrewStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
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
