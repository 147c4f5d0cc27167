use aerorhythm_core::actor::Actor;
use aerorhythm_core::{types, validation};
use aerorhythm_persistence::flight::Model;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flight::KIND;
use crate::query::{Page, Window};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewFlight {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    #[serde(default)]
    pub aircraft: Option<String>,
    #[serde(default = "empty_object")]
    pub attributes: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl NewFlight {
    pub fn new(
        id: impl Into<String>,
        flight_number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            flight_number: flight_number.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure,
            arrival,
            aircraft: None,
            attributes: empty_object(),
        }
    }

    pub fn validate(&self) -> types::Result<()> {
        validation::require_text(&KIND, "id", &self.id, 64)?;
        validation::require_text(&KIND, "flight_number", &self.flight_number, 32)?;
        validation::require_text(&KIND, "origin", &self.origin, 10)?;
        validation::require_text(&KIND, "destination", &self.destination, 10)?;
        validation::optional_text(&KIND, "aircraft", self.aircraft.as_deref(), 50)?;
        validation::require_object(&KIND, "attributes", &self.attributes)?;
        validation::require_ordered(
            &KIND,
            "departure",
            &self.departure,
            "arrival",
            &self.arrival,
        )?;

        Ok(())
    }
}

/// Partial update. The flight id is immutable.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure: Option<DateTime<Utc>>,
    pub arrival: Option<DateTime<Utc>>,
    pub aircraft: Option<Option<String>>,
    pub attributes: Option<Value>,
}

impl FlightPatch {
    /// Checks the patch merged over `current`, so a moved departure is still compared
    /// against the stored arrival.
    pub fn validate_against(&self, current: &Model) -> types::Result<()> {
        if let Some(v) = &self.flight_number {
            validation::require_text(&KIND, "flight_number", v, 32)?;
        }

        if let Some(v) = &self.origin {
            validation::require_text(&KIND, "origin", v, 10)?;
        }

        if let Some(v) = &self.destination {
            validation::require_text(&KIND, "destination", v, 10)?;
        }

        if let Some(v) = &self.aircraft {
            validation::optional_text(&KIND, "aircraft", v.as_deref(), 50)?;
        }

        if let Some(v) = &self.attributes {
            validation::require_object(&KIND, "attributes", v)?;
        }

        let departure = self.departure.unwrap_or(current.departure);
        let arrival = self.arrival.unwrap_or(current.arrival);

        validation::require_ordered(&KIND, "departure", &departure, "arrival", &arrival)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlightFilter {
    /// Keeps flights that depart at or after `start` and arrive at or before `end`.
    pub window: Window,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl FlightFilter {
    pub fn within(window: Window) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Adds a flight under its caller supplied id, which must be unique.
    async fn create(&self, actor: &Actor, input: NewFlight) -> types::Result<Model>;

    async fn get(&self, id: &str) -> types::Result<Option<Model>>;

    /// Lists flights ordered by departure, then id.
    async fn list(&self, filter: &FlightFilter, page: Page) -> types::Result<Vec<Model>>;

    async fn update(
        &self,
        actor: &Actor,
        id: &str,
        patch: FlightPatch,
    ) -> types::Result<Option<Model>>;

    /// Removes a flight together with every roster assignment referencing it.
    async fn delete(&self, actor: &Actor, id: &str) -> types::Result<bool>;
}
