use aerorhythm_core::{types, validation};
use aerorhythm_persistence::disruption::{DisruptionKind, Model, Severity};
use async_trait::async_trait;
use serde_json::Value;

use crate::disruption::KIND;
use crate::query::Page;

#[derive(Clone, Debug, PartialEq)]
pub struct NewDisruption {
    pub kind: DisruptionKind,
    pub severity: Severity,
    pub affected: Value,
    pub attributes: Value,
}

impl NewDisruption {
    pub fn new(kind: DisruptionKind, severity: Severity) -> Self {
        Self {
            kind,
            severity,
            affected: Value::Object(Default::default()),
            attributes: Value::Object(Default::default()),
        }
    }

    pub fn validate(&self) -> types::Result<()> {
        validation::require_text(&KIND, "type", self.kind.as_str(), 80)?;
        validation::require_object(&KIND, "affected", &self.affected)?;
        validation::require_object(&KIND, "attributes", &self.attributes)?;

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisruptionPatch {
    pub severity: Option<Severity>,
    pub affected: Option<Value>,
    pub attributes: Option<Value>,
}

impl DisruptionPatch {
    pub fn validate(&self) -> types::Result<()> {
        if let Some(v) = &self.affected {
            validation::require_object(&KIND, "affected", v)?;
        }

        if let Some(v) = &self.attributes {
            validation::require_object(&KIND, "attributes", v)?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisruptionFilter {
    pub kind: Option<DisruptionKind>,
    pub severity: Option<Severity>,
}

#[async_trait]
pub trait Repository: Send + Sync {
    async fn create(&self, input: NewDisruption) -> types::Result<Model>;

    async fn get(&self, id: i64) -> types::Result<Option<Model>>;

    /// Lists disruptions newest first.
    async fn list(&self, filter: &DisruptionFilter, page: Page) -> types::Result<Vec<Model>>;

    async fn update(&self, id: i64, patch: DisruptionPatch) -> types::Result<Option<Model>>;

    async fn delete(&self, id: i64) -> types::Result<bool>;
}
