use aerorhythm_core::constants::Constants;
use aerorhythm_core::errors::Error;
use aerorhythm_core::{err_not_found, types};
use aerorhythm_persistence::job::{ActiveModel, Column, Entity, JobStatus, JobType, Model};
use aerorhythm_persistence::Storage;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::job::repository::{JobCompletion, JobFilter, Repository};
use crate::job::KIND;
use crate::query::Page;
use crate::roster_assignment::repository::NewAssignment;
use crate::roster_assignment::service::insert_batch;
use crate::util::truncate_message;

pub struct Service {
    storage: Storage,
    max_error_message_length: usize,
}

impl Service {
    pub fn new(storage: Storage, max_error_message_length: usize) -> Arc<Box<dyn Repository>> {
        Arc::new(Box::new(Self {
            storage,
            max_error_message_length,
        }))
    }

    async fn current_status<C: ConnectionTrait>(conn: &C, id: i64) -> types::Result<String> {
        Ok(Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(|x| x.status.to_string())
            .unwrap_or_else(|| "missing".to_string()))
    }

    async fn finish_with_failure<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        message: &str,
    ) -> types::Result<Model> {
        let result = Entity::update_many()
            .set(ActiveModel {
                status: Set(JobStatus::Failed),
                completed_at: Set(Some(Utc::now())),
                error_message: Set(Some(truncate_message(
                    message,
                    self.max_error_message_length,
                ))),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(JobStatus::Running))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::InvalidStateTransition {
                handle: id.to_string(),
                from: Self::current_status(conn, id).await?,
                to: JobStatus::Failed.to_string(),
            });
        }

        Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| err_not_found!(KIND.as_str(), id))
    }
}

#[async_trait]
impl Repository for Service {
    async fn create(&self, job_type: JobType, parameters: Value) -> types::Result<Model> {
        self.storage
            .bounded("job.create", async {
                let obj = ActiveModel {
                    job_type: Set(job_type),
                    status: Set(JobStatus::Pending),
                    parameters: Set(parameters),
                    created_at: Set(Utc::now()),
                    started_at: Set(None),
                    completed_at: Set(None),
                    result: Set(None),
                    error_message: Set(None),
                    ..Default::default()
                }
                .insert(self.storage.connection())
                .await?;

                tracing::info!("submitted {} job with id {}", obj.job_type, obj.id);

                Ok(obj)
            })
            .await
    }

    async fn get(&self, id: i64) -> types::Result<Option<Model>> {
        self.storage
            .bounded("job.get", async {
                Ok(Entity::find_by_id(id)
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn list(&self, filter: &JobFilter, page: Page) -> types::Result<Vec<Model>> {
        let mut select = Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status));
        }

        if let Some(job_type) = filter.job_type {
            select = select.filter(Column::JobType.eq(job_type));
        }

        let select = page.apply(
            select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
        );

        self.storage
            .bounded("job.list", async {
                Ok(select.all(self.storage.connection()).await?)
            })
            .await
    }

    async fn try_start(&self, id: i64) -> types::Result<Option<Model>> {
        self.storage
            .bounded("job.try_start", async {
                let tx = self.storage.connection().begin().await?;

                let result = Entity::update_many()
                    .set(ActiveModel {
                        status: Set(JobStatus::Running),
                        started_at: Set(Some(Utc::now())),
                        ..Default::default()
                    })
                    .filter(Column::Id.eq(id))
                    .filter(Column::Status.eq(JobStatus::Pending))
                    .exec(&tx)
                    .await?;

                if result.rows_affected == 0 {
                    return Ok(None);
                }

                let obj = Entity::find_by_id(id).one(&tx).await?;

                tx.commit().await?;

                Ok(obj)
            })
            .await
    }

    async fn complete(
        &self,
        id: i64,
        assignments: Vec<NewAssignment>,
        mut summary: Map<String, Value>,
    ) -> types::Result<JobCompletion> {
        self.storage
            .bounded("job.complete", async {
                let tx = self.storage.connection().begin().await?;

                let assignments = insert_batch(&tx, assignments).await?;

                summary.insert(
                    Constants::ResultAssignmentIds.to_string(),
                    Value::from(assignments.iter().map(|x| x.id).collect::<Vec<_>>()),
                );
                summary.insert(
                    Constants::ResultTotalAssignments.to_string(),
                    Value::from(assignments.len()),
                );

                let result = Entity::update_many()
                    .set(ActiveModel {
                        status: Set(JobStatus::Success),
                        completed_at: Set(Some(Utc::now())),
                        result: Set(Some(Value::Object(summary))),
                        ..Default::default()
                    })
                    .filter(Column::Id.eq(id))
                    .filter(Column::Status.eq(JobStatus::Running))
                    .exec(&tx)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(Error::InvalidStateTransition {
                        handle: id.to_string(),
                        from: Self::current_status(&tx, id).await?,
                        to: JobStatus::Success.to_string(),
                    });
                }

                let job = Entity::find_by_id(id)
                    .one(&tx)
                    .await?
                    .ok_or_else(|| err_not_found!(KIND.as_str(), id))?;

                tx.commit().await?;

                Ok(JobCompletion { job, assignments })
            })
            .await
    }

    async fn fail(&self, id: i64, message: &str) -> types::Result<Model> {
        self.storage
            .bounded("job.fail", async {
                let tx = self.storage.connection().begin().await?;

                let obj = self.finish_with_failure(&tx, id, message).await?;

                tx.commit().await?;

                Ok(obj)
            })
            .await
    }

    async fn fail_interrupted(&self, message: &str) -> types::Result<u64> {
        self.storage
            .bounded("job.fail_interrupted", async {
                let result = Entity::update_many()
                    .set(ActiveModel {
                        status: Set(JobStatus::Failed),
                        completed_at: Set(Some(Utc::now())),
                        error_message: Set(Some(truncate_message(
                            message,
                            self.max_error_message_length,
                        ))),
                        ..Default::default()
                    })
                    .filter(Column::Status.eq(JobStatus::Running))
                    .exec(self.storage.connection())
                    .await?;

                Ok(result.rows_affected)
            })
            .await
    }
}
