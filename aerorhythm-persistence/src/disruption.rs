use sea_orm::entity::prelude::*;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// Well known disruption types. The column stays an open string, so anything
/// unrecognised round-trips through `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisruptionKind {
    CrewIllness,
    WeatherDelay,
    AircraftMaintenance,
    SchedulingConflict,
    AirportClosure,
    Other(String),
}

impl DisruptionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CrewIllness => "crew_illness",
            Self::WeatherDelay => "weather_delay",
            Self::AircraftMaintenance => "aircraft_maintenance",
            Self::SchedulingConflict => "scheduling_conflict",
            Self::AirportClosure => "airport_closure",
            Self::Other(v) => v.as_str(),
        }
    }
}

impl From<&str> for DisruptionKind {
    fn from(value: &str) -> Self {
        match value {
            "crew_illness" => Self::CrewIllness,
            "weather_delay" => Self::WeatherDelay,
            "aircraft_maintenance" => Self::AircraftMaintenance,
            "scheduling_conflict" => Self::SchedulingConflict,
            "airport_closure" => Self::AirportClosure,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DisruptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "disruptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub disruption_type: String,
    pub severity: Severity,
    /// Impacted crew and flight identifiers, e.g. `{"flights": ["AI205-20250701"]}`.
    pub affected: Json,
    pub attributes: Json,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn kind(&self) -> DisruptionKind {
        DisruptionKind::from(self.disruption_type.as_str())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
