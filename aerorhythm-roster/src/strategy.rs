use aerorhythm_core::constants::Constants;
use aerorhythm_core::types;
use aerorhythm_persistence::job::JobType;
use aerorhythm_persistence::{crew, flight};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveEnum;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::query::Window;
use crate::roster_assignment::repository::NewAssignment;

pub const ROUND_ROBIN_SOURCE: &str = "simple-assigner";
pub const ROUND_ROBIN_CONFIDENCE: f64 = 0.9;

/// Proposed roster plus the strategy's own view of how good it is.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    pub assignments: Vec<NewAssignment>,
    pub confidence: f64,
    pub metrics: Map<String, Value>,
}

/// Turns the available crew and the flights of a window into assignments.
/// Implementations must not touch storage; the caller persists the output.
#[async_trait]
pub trait RosterStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(
        &self,
        crews: &[crew::Model],
        flights: &[flight::Model],
        window: &Window,
    ) -> types::Result<Generation>;
}

fn assignment_attributes() -> Value {
    let mut attributes = Map::new();
    attributes.insert(
        Constants::AssignmentSource.to_string(),
        Value::from(ROUND_ROBIN_SOURCE),
    );
    attributes.insert(
        Constants::AssignmentConfidence.to_string(),
        Value::from(ROUND_ROBIN_CONFIDENCE),
    );

    Value::Object(attributes)
}

/// Pairs the i-th crew member with the i-th flight until either list runs out.
#[derive(Clone, Debug, Default)]
pub struct RoundRobinStrategy;

#[async_trait]
impl RosterStrategy for RoundRobinStrategy {
    fn name(&self) -> &str {
        "round_robin"
    }

    async fn generate(
        &self,
        crews: &[crew::Model],
        flights: &[flight::Model],
        _window: &Window,
    ) -> types::Result<Generation> {
        let assignments: Vec<NewAssignment> = crews
            .iter()
            .zip(flights.iter())
            .map(|(c, f)| NewAssignment {
                crew_id: c.id,
                flight_id: f.id.clone(),
                start: f.departure,
                end: f.arrival,
                position: Some(c.rank.to_value()),
                attributes: assignment_attributes(),
            })
            .collect();

        let mut metrics = Map::new();
        metrics.insert(
            Constants::ResultGeneratedAt.to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        metrics.insert(
            Constants::ResultTotalAssignments.to_string(),
            Value::from(assignments.len()),
        );

        tracing::debug!(
            "round robin paired {} of {} crew with {} flights",
            assignments.len(),
            crews.len(),
            flights.len()
        );

        Ok(Generation {
            assignments,
            confidence: ROUND_ROBIN_CONFIDENCE,
            metrics,
        })
    }
}

#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<JobType, Arc<dyn RosterStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the round robin strategy serving roster generation.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JobType::RosterGeneration, Arc::new(RoundRobinStrategy));
        registry
    }

    /// Replaces any strategy previously registered for `job_type`.
    pub fn register(&mut self, job_type: JobType, strategy: Arc<dyn RosterStrategy>) {
        tracing::debug!("registered strategy '{}' for {}", strategy.name(), job_type);

        self.strategies.insert(job_type, strategy);
    }

    pub fn get(&self, job_type: &JobType) -> Option<Arc<dyn RosterStrategy>> {
        self.strategies.get(job_type).cloned()
    }
}
