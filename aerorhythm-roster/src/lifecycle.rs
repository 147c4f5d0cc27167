use aerorhythm_core::config;
use aerorhythm_core::constants::Constants;
use aerorhythm_core::errors::Error;
use aerorhythm_core::{err_not_found, err_validation, types, validation};
use aerorhythm_persistence::job::{JobStatus, JobType, Model};
use aerorhythm_persistence::Storage;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::crew::repository::CrewFilter;
use crate::flight::repository::FlightFilter;
use crate::job::repository::{JobCompletion, JobFilter};
use crate::job::KIND;
use crate::query::{Page, Window};
use crate::strategy::StrategyRegistry;
use crate::{crew, flight, job, metric};

const INTERRUPTED_MESSAGE: &str = "interrupted before completion";

/// Input of a roster generation job, stored as `{"start": ts, "end": ts}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterGenerationParameters {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RosterGenerationParameters {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn window(&self) -> Window {
        Window::between(self.start, self.end)
    }

    pub fn to_value(&self) -> Value {
        let mut params = Map::new();
        params.insert(
            Constants::WindowStartParameter.to_string(),
            Value::from(self.start.to_rfc3339()),
        );
        params.insert(
            Constants::WindowEndParameter.to_string(),
            Value::from(self.end.to_rfc3339()),
        );

        Value::Object(params)
    }

    pub fn from_value(value: &Value) -> types::Result<Self> {
        validation::require_object(&KIND, "parameters", value)?;

        let start = timestamp_parameter(value, Constants::WindowStartParameter)?;
        let end = timestamp_parameter(value, Constants::WindowEndParameter)?;

        validation::require_ordered(&KIND, "start", &start, "end", &end)?;

        Ok(Self { start, end })
    }
}

fn timestamp_parameter(value: &Value, key: Constants) -> types::Result<DateTime<Utc>> {
    let key = key.to_string();

    let raw = value
        .get(&key)
        .and_then(|x| x.as_str())
        .ok_or_else(|| err_validation!(KIND.as_str(), "parameter '{}' is required", key))?;

    DateTime::parse_from_rfc3339(raw)
        .map(|x| x.with_timezone(&Utc))
        .map_err(|e| {
            err_validation!(
                KIND.as_str(),
                "parameter '{}' is not an RFC 3339 timestamp, {}",
                key,
                e
            )
        })
}

/// Result of start-up recovery.
#[derive(Debug)]
pub struct RecoveryReport {
    /// Jobs found running and marked failed.
    pub interrupted: u64,
    /// One handle per pending job that was dispatched again.
    pub dispatched: Vec<JoinHandle<()>>,
}

/// Drives jobs through `PENDING -> RUNNING -> {SUCCESS, FAILED}`. Cloning is cheap
/// and every clone shares the same repositories and strategies.
#[derive(Clone)]
pub struct JobManager {
    jobs: job::Repository,
    crews: crew::Repository,
    flights: flight::Repository,
    strategies: Arc<StrategyRegistry>,
}

impl JobManager {
    pub fn new(storage: &Storage, strategies: StrategyRegistry, config: &config::job::Job) -> Self {
        Self::from_parts(
            job::service::Service::new(storage.clone(), config.max_error_message_length),
            crew::service::Service::new(storage.clone()),
            flight::service::Service::new(storage.clone()),
            strategies,
        )
    }

    pub fn from_parts(
        jobs: job::Repository,
        crews: crew::Repository,
        flights: flight::Repository,
        strategies: StrategyRegistry,
    ) -> Self {
        Self {
            jobs,
            crews,
            flights,
            strategies: Arc::new(strategies),
        }
    }

    /// Validates `parameters` for `job_type` and records a pending job. Nothing runs yet.
    pub async fn submit(&self, job_type: JobType, parameters: Value) -> types::Result<Model> {
        match job_type {
            JobType::RosterGeneration => {
                RosterGenerationParameters::from_value(&parameters)?;
            }
        }

        let job = self.jobs.create(job_type, parameters).await?;

        metric::job_submission_count_metric()
            .with_label_values(&[&job_type.to_string()])
            .inc();

        Ok(job)
    }

    pub async fn submit_roster_generation(
        &self,
        params: RosterGenerationParameters,
    ) -> types::Result<Model> {
        self.submit(JobType::RosterGeneration, params.to_value()).await
    }

    /// Runs a pending job to completion. A job that is not pending is left untouched
    /// and returned as is, so concurrent or repeated calls execute it at most once.
    ///
    /// Failures of the job itself end up in its `error_message`. Only a storage
    /// failure while recording the outcome is returned.
    pub async fn run(&self, id: i64) -> types::Result<Option<Model>> {
        let job = match self.jobs.try_start(id).await? {
            Some(job) => job,
            None => {
                tracing::debug!("job {} is not pending, skipping run", id);
                return self.jobs.get(id).await;
            }
        };

        let job_type = job.job_type.to_string();

        tracing::info!("started {} job {}", job_type, id);

        let timer = metric::job_run_duration_metric()
            .with_label_values(&[&job_type])
            .start_timer();

        let finished = match self.execute(&job).await {
            Ok(completion) => {
                tracing::info!(
                    "job {} succeeded with {} assignments",
                    id,
                    completion.assignments.len()
                );

                Ok(completion.job)
            }
            Err(e) => self.record_failure(id, &e).await,
        };

        timer.observe_duration();

        if let Ok(job) = &finished {
            metric::job_completion_count_metric()
                .with_label_values(&[&job_type, &job.status.to_string()])
                .inc();
        }

        finished.map(Some)
    }

    async fn execute(&self, job: &Model) -> types::Result<JobCompletion> {
        let params = RosterGenerationParameters::from_value(&job.parameters)?;
        let window = params.window();

        let strategy = self
            .strategies
            .get(&job.job_type)
            .ok_or_else(|| Error::StrategyFailure {
                strategy: job.job_type.to_string(),
                message: "no strategy is registered for this job type".to_string(),
            })?;

        let crews = self.crews.list(&CrewFilter::active(), Page::all()).await?;
        let flights = self
            .flights
            .list(&FlightFilter::within(window), Page::all())
            .await?;

        let strategy_name = strategy.name().to_string();

        tracing::debug!(
            "job {} feeding {} crew and {} flights to strategy '{}'",
            job.id,
            crews.len(),
            flights.len(),
            strategy_name
        );

        // Separate task so a panicking strategy fails the job instead of the caller.
        let generation = tokio::spawn(async move {
            strategy.generate(&crews, &flights, &window).await
        })
        .await
        .map_err(|e| Error::StrategyFailure {
            strategy: strategy_name.clone(),
            message: e.to_string(),
        })??;

        metric::generated_assignment_count_metric()
            .with_label_values(&[&strategy_name])
            .observe(generation.assignments.len() as f64);

        let mut summary = Map::new();
        summary.insert(
            Constants::ResultConfidence.to_string(),
            Value::from(generation.confidence),
        );
        summary.insert(
            Constants::ResultGeneratedAt.to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        summary.insert(Constants::ResultWindow.to_string(), params.to_value());
        summary.insert(
            Constants::ResultMetrics.to_string(),
            Value::Object(generation.metrics),
        );

        self.jobs
            .complete(job.id, generation.assignments, summary)
            .await
    }

    async fn record_failure(&self, id: i64, cause: &Error) -> types::Result<Model> {
        tracing::warn!("job {} failed, {}", id, cause);

        match self.jobs.fail(id, &cause.to_string()).await {
            Ok(job) => Ok(job),
            Err(e) if e.is_retryable() => {
                tracing::error!("could not record failure of job {}, {}", id, e);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("job {} was already finished elsewhere, {}", id, e);

                self.jobs
                    .get(id)
                    .await?
                    .ok_or_else(|| err_not_found!(KIND.as_str(), id))
            }
        }
    }

    pub async fn get(&self, id: i64) -> types::Result<Option<Model>> {
        self.jobs.get(id).await
    }

    pub async fn list(&self, filter: &JobFilter, page: Page) -> types::Result<Vec<Model>> {
        self.jobs.list(filter, page).await
    }

    /// Runs the job on the tokio runtime without waiting for it.
    pub fn dispatch(&self, id: i64) -> JoinHandle<()> {
        let manager = self.clone();

        tokio::spawn(async move {
            if let Err(e) = manager.run(id).await {
                tracing::error!("dispatched job {} could not be finished, {}", id, e);
            }
        })
    }

    pub async fn submit_and_dispatch(
        &self,
        job_type: JobType,
        parameters: Value,
    ) -> types::Result<(Model, JoinHandle<()>)> {
        let job = self.submit(job_type, parameters).await?;
        let handle = self.dispatch(job.id);

        Ok((job, handle))
    }

    /// Fails jobs a previous process left running, then dispatches leftover pending
    /// jobs oldest first.
    pub async fn recover(&self) -> types::Result<RecoveryReport> {
        let interrupted = self.jobs.fail_interrupted(INTERRUPTED_MESSAGE).await?;

        if interrupted > 0 {
            tracing::warn!("marked {} interrupted jobs as failed", interrupted);
        }

        let filter = JobFilter {
            status: Some(JobStatus::Pending),
            ..Default::default()
        };

        let mut pending = self.jobs.list(&filter, Page::all()).await?;
        pending.reverse();

        let dispatched: Vec<_> = pending.iter().map(|x| self.dispatch(x.id)).collect();

        tracing::info!("recovery dispatched {} pending jobs", dispatched.len());

        Ok(RecoveryReport {
            interrupted,
            dispatched,
        })
    }
}
