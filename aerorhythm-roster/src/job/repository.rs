use aerorhythm_core::types;
use aerorhythm_persistence::job::{JobStatus, JobType, Model};
use aerorhythm_persistence::roster_assignment;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::query::Page;
use crate::roster_assignment::repository::NewAssignment;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

/// Outcome of a successful run: the job in its terminal state and the rows it produced.
#[derive(Clone, Debug)]
pub struct JobCompletion {
    pub job: Model,
    pub assignments: Vec<roster_assignment::Model>,
}

/// Persistence side of the job state machine. Every transition is a conditional
/// update on the current status, so concurrent callers cannot both win.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn create(&self, job_type: JobType, parameters: Value) -> types::Result<Model>;

    async fn get(&self, id: i64) -> types::Result<Option<Model>>;

    /// Lists jobs newest first.
    async fn list(&self, filter: &JobFilter, page: Page) -> types::Result<Vec<Model>>;

    /// `PENDING -> RUNNING`. Returns `None` when the job is missing or was not pending.
    async fn try_start(&self, id: i64) -> types::Result<Option<Model>>;

    /// `RUNNING -> SUCCESS`, persisting `assignments` in the same transaction.
    /// Their ids and count are merged into `summary` before it is stored as the result.
    async fn complete(
        &self,
        id: i64,
        assignments: Vec<NewAssignment>,
        summary: Map<String, Value>,
    ) -> types::Result<JobCompletion>;

    /// `RUNNING -> FAILED`.
    async fn fail(&self, id: i64, message: &str) -> types::Result<Model>;

    /// Fails every job still marked running. Returns the number of jobs touched.
    async fn fail_interrupted(&self, message: &str) -> types::Result<u64>;
}
