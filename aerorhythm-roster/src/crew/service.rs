use aerorhythm_core::actor::Actor;
use aerorhythm_core::errors::Error;
use aerorhythm_core::types;
use aerorhythm_persistence::crew::{ActiveModel, Column, Entity, Model};
use aerorhythm_persistence::roster_assignment::{
    Column as RosterAssignmentColumn, Entity as RosterAssignmentEntity,
};
use aerorhythm_persistence::Storage;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;

use crate::crew::repository::{CrewFilter, CrewPatch, NewCrew, Repository};
use crate::crew::KIND;
use crate::query::Page;

pub struct Service {
    storage: Storage,
}

impl Service {
    pub fn new(storage: Storage) -> Arc<Box<dyn Repository>> {
        Arc::new(Box::new(Self { storage }))
    }

    fn map_write_err(err: DbErr, employee_id: &str) -> Error {
        Error::from_constraint(err, &KIND, "employee_id", || employee_id.to_string())
    }
}

#[async_trait]
impl Repository for Service {
    async fn create(&self, actor: &Actor, input: NewCrew) -> types::Result<Model> {
        actor.authorize("create crew")?;
        input.validate()?;

        self.storage
            .bounded("crew.create", async {
                let now = Utc::now();

                let tx = self.storage.connection().begin().await?;

                let obj = ActiveModel {
                    employee_id: Set(input.employee_id.clone()),
                    first_name: Set(input.first_name),
                    last_name: Set(input.last_name),
                    rank: Set(input.rank),
                    base_airport: Set(input.base_airport),
                    hire_date: Set(input.hire_date),
                    seniority_number: Set(input.seniority_number),
                    status: Set(input.status),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&tx)
                .await
                .map_err(|e| Self::map_write_err(e, &input.employee_id))?;

                tx.commit().await?;

                tracing::info!("created crew '{}' with id {}", obj.employee_id, obj.id);

                Ok(obj)
            })
            .await
    }

    async fn get(&self, id: i64) -> types::Result<Option<Model>> {
        self.storage
            .bounded("crew.get", async {
                Ok(Entity::find_by_id(id)
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn get_by_employee_id(&self, employee_id: &str) -> types::Result<Option<Model>> {
        self.storage
            .bounded("crew.get_by_employee_id", async {
                Ok(Entity::find()
                    .filter(Column::EmployeeId.eq(employee_id))
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn list(&self, filter: &CrewFilter, page: Page) -> types::Result<Vec<Model>> {
        let mut select = Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status));
        }

        if let Some(rank) = filter.rank {
            select = select.filter(Column::Rank.eq(rank));
        }

        if let Some(base_airport) = &filter.base_airport {
            select = select.filter(Column::BaseAirport.eq(base_airport.clone()));
        }

        let select = page.apply(
            select
                .order_by_asc(Column::SeniorityNumber)
                .order_by_asc(Column::Id),
        );

        self.storage
            .bounded("crew.list", async {
                Ok(select.all(self.storage.connection()).await?)
            })
            .await
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        patch: CrewPatch,
    ) -> types::Result<Option<Model>> {
        actor.authorize("update crew")?;
        patch.validate()?;

        self.storage
            .bounded("crew.update", async {
                let tx = self.storage.connection().begin().await?;

                let existing = match Entity::find_by_id(id).one(&tx).await? {
                    Some(v) => v,
                    None => return Ok(None),
                };

                let employee_id = patch
                    .employee_id
                    .clone()
                    .unwrap_or_else(|| existing.employee_id.clone());

                let mut model = existing.into_active_model();

                if let Some(v) = patch.employee_id {
                    model.employee_id = Set(v);
                }
                if let Some(v) = patch.first_name {
                    model.first_name = Set(v);
                }
                if let Some(v) = patch.last_name {
                    model.last_name = Set(v);
                }
                if let Some(v) = patch.rank {
                    model.rank = Set(v);
                }
                if let Some(v) = patch.base_airport {
                    model.base_airport = Set(v);
                }
                if let Some(v) = patch.hire_date {
                    model.hire_date = Set(v);
                }
                if let Some(v) = patch.seniority_number {
                    model.seniority_number = Set(v);
                }
                if let Some(v) = patch.status {
                    model.status = Set(v);
                }
                model.updated_at = Set(Utc::now());

                let obj = model
                    .update(&tx)
                    .await
                    .map_err(|e| Self::map_write_err(e, &employee_id))?;

                tx.commit().await?;

                Ok(Some(obj))
            })
            .await
    }

    async fn delete(&self, actor: &Actor, id: i64) -> types::Result<bool> {
        actor.authorize("delete crew")?;

        self.storage
            .bounded("crew.delete", async {
                let tx = self.storage.connection().begin().await?;

                // Mirrors the ON DELETE CASCADE of the foreign key, for backends that do not enforce it.
                let assignments = RosterAssignmentEntity::delete_many()
                    .filter(RosterAssignmentColumn::CrewId.eq(id))
                    .exec(&tx)
                    .await?;

                let result = Entity::delete_by_id(id).exec(&tx).await?;

                if result.rows_affected == 0 {
                    tx.rollback().await?;
                    return Ok(false);
                }

                tx.commit().await?;

                tracing::info!(
                    "deleted crew {} and {} roster assignments",
                    id,
                    assignments.rows_affected
                );

                Ok(true)
            })
            .await
    }
}
