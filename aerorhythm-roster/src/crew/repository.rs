use aerorhythm_core::actor::Actor;
use aerorhythm_core::{types, validation};
use aerorhythm_persistence::crew::{CrewStatus, Model, Rank};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crew::KIND;
use crate::query::Page;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewCrew {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub rank: Rank,
    #[serde(default)]
    pub base_airport: Option<String>,
    #[serde(default)]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seniority_number: i32,
    #[serde(default)]
    pub status: CrewStatus,
}

impl NewCrew {
    pub fn new(
        employee_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        rank: Rank,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            rank,
            base_airport: None,
            hire_date: None,
            seniority_number: 0,
            status: CrewStatus::Active,
        }
    }

    pub fn validate(&self) -> types::Result<()> {
        validation::require_text(&KIND, "employee_id", &self.employee_id, 50)?;
        validation::require_text(&KIND, "first_name", &self.first_name, 100)?;
        validation::require_text(&KIND, "last_name", &self.last_name, 100)?;
        validation::optional_text(&KIND, "base_airport", self.base_airport.as_deref(), 10)?;

        Ok(())
    }
}

/// Partial update. `None` leaves a field untouched; the nested options clear nullable columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrewPatch {
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rank: Option<Rank>,
    pub base_airport: Option<Option<String>>,
    pub hire_date: Option<Option<DateTime<Utc>>>,
    pub seniority_number: Option<i32>,
    pub status: Option<CrewStatus>,
}

impl CrewPatch {
    pub fn validate(&self) -> types::Result<()> {
        if let Some(v) = &self.employee_id {
            validation::require_text(&KIND, "employee_id", v, 50)?;
        }

        if let Some(v) = &self.first_name {
            validation::require_text(&KIND, "first_name", v, 100)?;
        }

        if let Some(v) = &self.last_name {
            validation::require_text(&KIND, "last_name", v, 100)?;
        }

        if let Some(v) = &self.base_airport {
            validation::optional_text(&KIND, "base_airport", v.as_deref(), 10)?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrewFilter {
    pub status: Option<CrewStatus>,
    pub rank: Option<Rank>,
    pub base_airport: Option<String>,
}

impl CrewFilter {
    pub fn active() -> Self {
        Self {
            status: Some(CrewStatus::Active),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Adds a crew member. `employee_id` must be unique.
    async fn create(&self, actor: &Actor, input: NewCrew) -> types::Result<Model>;

    async fn get(&self, id: i64) -> types::Result<Option<Model>>;

    async fn get_by_employee_id(&self, employee_id: &str) -> types::Result<Option<Model>>;

    /// Lists crew ordered by seniority number, then id.
    async fn list(&self, filter: &CrewFilter, page: Page) -> types::Result<Vec<Model>>;

    async fn update(&self, actor: &Actor, id: i64, patch: CrewPatch)
        -> types::Result<Option<Model>>;

    /// Removes a crew member together with every roster assignment referencing it.
    async fn delete(&self, actor: &Actor, id: i64) -> types::Result<bool>;
}
