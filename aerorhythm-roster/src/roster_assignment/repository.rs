use aerorhythm_core::{types, validation};
use aerorhythm_persistence::roster_assignment::Model;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::{Page, Window};
use crate::roster_assignment::KIND;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewAssignment {
    pub crew_id: i64,
    pub flight_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default = "empty_object")]
    pub attributes: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl NewAssignment {
    pub fn new(
        crew_id: i64,
        flight_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            crew_id,
            flight_id: flight_id.into(),
            start,
            end,
            position: None,
            attributes: empty_object(),
        }
    }

    pub fn validate(&self) -> types::Result<()> {
        validation::require_text(&KIND, "flight_id", &self.flight_id, 64)?;
        validation::optional_text(&KIND, "position", self.position.as_deref(), 32)?;
        validation::require_object(&KIND, "attributes", &self.attributes)?;
        validation::require_ordered(&KIND, "start", &self.start, "end", &self.end)?;

        Ok(())
    }
}

/// Partial update. The crew and flight of an assignment are immutable.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AssignmentPatch {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub position: Option<Option<String>>,
    pub attributes: Option<Value>,
}

impl AssignmentPatch {
    pub fn validate_against(&self, current: &Model) -> types::Result<()> {
        if let Some(v) = &self.position {
            validation::optional_text(&KIND, "position", v.as_deref(), 32)?;
        }

        if let Some(v) = &self.attributes {
            validation::require_object(&KIND, "attributes", v)?;
        }

        let start = self.start.unwrap_or(current.start);
        let end = self.end.unwrap_or(current.end);

        validation::require_ordered(&KIND, "start", &start, "end", &end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssignmentFilter {
    /// Keeps assignments whose duty window overlaps this one.
    pub window: Window,
    pub crew_id: Option<i64>,
    pub flight_id: Option<String>,
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Assigns a crew member to a flight. Both must exist and the pair must be new.
    async fn create(&self, input: NewAssignment) -> types::Result<Model>;

    /// Inserts every item or none of them.
    async fn bulk_create(&self, items: Vec<NewAssignment>) -> types::Result<Vec<Model>>;

    async fn get(&self, id: i64) -> types::Result<Option<Model>>;

    /// Lists assignments ordered by start, then id.
    async fn list(&self, filter: &AssignmentFilter, page: Page) -> types::Result<Vec<Model>>;

    async fn list_for_crew(&self, crew_id: i64) -> types::Result<Vec<Model>>;

    async fn update(&self, id: i64, patch: AssignmentPatch) -> types::Result<Option<Model>>;

    async fn delete(&self, id: i64) -> types::Result<bool>;
}
