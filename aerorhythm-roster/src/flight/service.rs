use aerorhythm_core::actor::Actor;
use aerorhythm_core::errors::Error;
use aerorhythm_core::types;
use aerorhythm_persistence::flight::{ActiveModel, Column, Entity, Model};
use aerorhythm_persistence::roster_assignment::{
    Column as RosterAssignmentColumn, Entity as RosterAssignmentEntity,
};
use aerorhythm_persistence::Storage;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;

use crate::flight::repository::{FlightFilter, FlightPatch, NewFlight, Repository};
use crate::flight::KIND;
use crate::query::Page;

pub struct Service {
    storage: Storage,
}

impl Service {
    pub fn new(storage: Storage) -> Arc<Box<dyn Repository>> {
        Arc::new(Box::new(Self { storage }))
    }
}

#[async_trait]
impl Repository for Service {
    async fn create(&self, actor: &Actor, input: NewFlight) -> types::Result<Model> {
        actor.authorize("create flight")?;
        input.validate()?;

        self.storage
            .bounded("flight.create", async {
                let now = Utc::now();
                let id = input.id.clone();

                let tx = self.storage.connection().begin().await?;

                let obj = ActiveModel {
                    id: Set(input.id),
                    flight_number: Set(input.flight_number),
                    origin: Set(input.origin),
                    destination: Set(input.destination),
                    departure: Set(input.departure),
                    arrival: Set(input.arrival),
                    aircraft: Set(input.aircraft),
                    attributes: Set(input.attributes),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&tx)
                .await
                .map_err(|e| Error::from_constraint(e, &KIND, "id", || id.clone()))?;

                tx.commit().await?;

                tracing::info!(
                    "created flight '{}' departing {}",
                    obj.id,
                    obj.departure.to_rfc3339()
                );

                Ok(obj)
            })
            .await
    }

    async fn get(&self, id: &str) -> types::Result<Option<Model>> {
        self.storage
            .bounded("flight.get", async {
                Ok(Entity::find_by_id(id.to_string())
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn list(&self, filter: &FlightFilter, page: Page) -> types::Result<Vec<Model>> {
        let mut select = Entity::find();

        if let Some(start) = filter.window.start {
            select = select.filter(Column::Departure.gte(start));
        }

        if let Some(end) = filter.window.end {
            select = select.filter(Column::Arrival.lte(end));
        }

        if let Some(origin) = &filter.origin {
            select = select.filter(Column::Origin.eq(origin.clone()));
        }

        if let Some(destination) = &filter.destination {
            select = select.filter(Column::Destination.eq(destination.clone()));
        }

        let select = page.apply(
            select
                .order_by_asc(Column::Departure)
                .order_by_asc(Column::Id),
        );

        self.storage
            .bounded("flight.list", async {
                Ok(select.all(self.storage.connection()).await?)
            })
            .await
    }

    async fn update(
        &self,
        actor: &Actor,
        id: &str,
        patch: FlightPatch,
    ) -> types::Result<Option<Model>> {
        actor.authorize("update flight")?;

        self.storage
            .bounded("flight.update", async {
                let tx = self.storage.connection().begin().await?;

                let existing = match Entity::find_by_id(id.to_string()).one(&tx).await? {
                    Some(v) => v,
                    None => return Ok(None),
                };

                patch.validate_against(&existing)?;

                let mut model = existing.into_active_model();

                if let Some(v) = patch.flight_number {
                    model.flight_number = Set(v);
                }
                if let Some(v) = patch.origin {
                    model.origin = Set(v);
                }
                if let Some(v) = patch.destination {
                    model.destination = Set(v);
                }
                if let Some(v) = patch.departure {
                    model.departure = Set(v);
                }
                if let Some(v) = patch.arrival {
                    model.arrival = Set(v);
                }
                if let Some(v) = patch.aircraft {
                    model.aircraft = Set(v);
                }
                if let Some(v) = patch.attributes {
                    model.attributes = Set(v);
                }
                model.updated_at = Set(Utc::now());

                let obj = model.update(&tx).await?;

                tx.commit().await?;

                Ok(Some(obj))
            })
            .await
    }

    async fn delete(&self, actor: &Actor, id: &str) -> types::Result<bool> {
        actor.authorize("delete flight")?;

        self.storage
            .bounded("flight.delete", async {
                let tx = self.storage.connection().begin().await?;

                // Mirrors the ON DELETE CASCADE of the foreign key, for backends that do not enforce it.
                let assignments = RosterAssignmentEntity::delete_many()
                    .filter(RosterAssignmentColumn::FlightId.eq(id))
                    .exec(&tx)
                    .await?;

                let result = Entity::delete_by_id(id.to_string()).exec(&tx).await?;

                if result.rows_affected == 0 {
                    tx.rollback().await?;
                    return Ok(false);
                }

                tx.commit().await?;

                tracing::info!(
                    "deleted flight '{}' and {} roster assignments",
                    id,
                    assignments.rows_affected
                );

                Ok(true)
            })
            .await
    }
}
