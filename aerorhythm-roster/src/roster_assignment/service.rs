use aerorhythm_core::errors::Error;
use aerorhythm_core::{err_not_found, types};
use aerorhythm_persistence::roster_assignment::{ActiveModel, Column, Entity, Model};
use aerorhythm_persistence::{crew, flight, Storage};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::query::Page;
use crate::roster_assignment::repository::{
    AssignmentFilter, AssignmentPatch, NewAssignment, Repository,
};
use crate::roster_assignment::KIND;

const PAIR_FIELD: &str = "crew_id,flight_id";

pub struct Service {
    storage: Storage,
}

impl Service {
    pub fn new(storage: Storage) -> Arc<Box<dyn Repository>> {
        Arc::new(Box::new(Self { storage }))
    }
}

async fn insert_one<C: ConnectionTrait>(conn: &C, input: NewAssignment) -> types::Result<Model> {
    if crew::Entity::find_by_id(input.crew_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(err_not_found!("Crew", input.crew_id));
    }

    if flight::Entity::find_by_id(input.flight_id.clone())
        .one(conn)
        .await?
        .is_none()
    {
        return Err(err_not_found!("Flight", input.flight_id));
    }

    let name = format!("{}/{}", input.crew_id, input.flight_id);

    ActiveModel {
        crew_id: Set(input.crew_id),
        flight_id: Set(input.flight_id),
        start: Set(input.start),
        end: Set(input.end),
        position: Set(input.position),
        attributes: Set(input.attributes),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| Error::from_constraint(e, &KIND, PAIR_FIELD, || name))
}

/// Validates and inserts a batch on an open transaction. The caller owns the commit,
/// so an error here leaves nothing behind once the transaction is dropped.
pub(crate) async fn insert_batch<C: ConnectionTrait>(
    conn: &C,
    items: Vec<NewAssignment>,
) -> types::Result<Vec<Model>> {
    let mut seen = HashSet::new();

    for item in items.iter() {
        item.validate()?;

        if !seen.insert((item.crew_id, item.flight_id.clone())) {
            return Err(Error::DuplicateKey {
                kind: KIND.to_string(),
                field: PAIR_FIELD.to_string(),
            });
        }
    }

    let mut out = Vec::with_capacity(items.len());

    for item in items {
        out.push(insert_one(conn, item).await?);
    }

    Ok(out)
}

#[async_trait]
impl Repository for Service {
    async fn create(&self, input: NewAssignment) -> types::Result<Model> {
        input.validate()?;

        self.storage
            .bounded("roster_assignment.create", async {
                let tx = self.storage.connection().begin().await?;

                let obj = insert_one(&tx, input).await?;

                tx.commit().await?;

                tracing::info!(
                    "assigned crew {} to flight '{}' with id {}",
                    obj.crew_id,
                    obj.flight_id,
                    obj.id
                );

                Ok(obj)
            })
            .await
    }

    async fn bulk_create(&self, items: Vec<NewAssignment>) -> types::Result<Vec<Model>> {
        if items.is_empty() {
            return Ok(vec![]);
        }

        self.storage
            .bounded("roster_assignment.bulk_create", async {
                let tx = self.storage.connection().begin().await?;

                let out = insert_batch(&tx, items).await?;

                tx.commit().await?;

                tracing::info!("bulk created {} roster assignments", out.len());

                Ok(out)
            })
            .await
    }

    async fn get(&self, id: i64) -> types::Result<Option<Model>> {
        self.storage
            .bounded("roster_assignment.get", async {
                Ok(Entity::find_by_id(id)
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn list(&self, filter: &AssignmentFilter, page: Page) -> types::Result<Vec<Model>> {
        let mut select = Entity::find();

        if let Some(end) = filter.window.end {
            select = select.filter(Column::Start.lt(end));
        }

        if let Some(start) = filter.window.start {
            select = select.filter(Column::End.gt(start));
        }

        if let Some(crew_id) = filter.crew_id {
            select = select.filter(Column::CrewId.eq(crew_id));
        }

        if let Some(flight_id) = &filter.flight_id {
            select = select.filter(Column::FlightId.eq(flight_id.clone()));
        }

        let select = page.apply(select.order_by_asc(Column::Start).order_by_asc(Column::Id));

        self.storage
            .bounded("roster_assignment.list", async {
                Ok(select.all(self.storage.connection()).await?)
            })
            .await
    }

    async fn list_for_crew(&self, crew_id: i64) -> types::Result<Vec<Model>> {
        let filter = AssignmentFilter {
            crew_id: Some(crew_id),
            ..Default::default()
        };

        self.list(&filter, Page::all()).await
    }

    async fn update(&self, id: i64, patch: AssignmentPatch) -> types::Result<Option<Model>> {
        self.storage
            .bounded("roster_assignment.update", async {
                let tx = self.storage.connection().begin().await?;

                let existing = match Entity::find_by_id(id).one(&tx).await? {
                    Some(v) => v,
                    None => return Ok(None),
                };

                patch.validate_against(&existing)?;

                let mut model = existing.into_active_model();

                if let Some(v) = patch.start {
                    model.start = Set(v);
                }
                if let Some(v) = patch.end {
                    model.end = Set(v);
                }
                if let Some(v) = patch.position {
                    model.position = Set(v);
                }
                if let Some(v) = patch.attributes {
                    model.attributes = Set(v);
                }

                let obj = model.update(&tx).await?;

                tx.commit().await?;

                Ok(Some(obj))
            })
            .await
    }

    async fn delete(&self, id: i64) -> types::Result<bool> {
        self.storage
            .bounded("roster_assignment.delete", async {
                let result = Entity::delete_by_id(id)
                    .exec(self.storage.connection())
                    .await?;

                Ok(result.rows_affected > 0)
            })
            .await
    }
}
