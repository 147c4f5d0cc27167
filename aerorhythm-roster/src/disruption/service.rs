use aerorhythm_core::types;
use aerorhythm_persistence::disruption::{ActiveModel, Column, Entity, Model};
use aerorhythm_persistence::Storage;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::sync::Arc;

use crate::disruption::repository::{DisruptionFilter, DisruptionPatch, NewDisruption, Repository};
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
    async fn create(&self, input: NewDisruption) -> types::Result<Model> {
        input.validate()?;

        self.storage
            .bounded("disruption.create", async {
                let obj = ActiveModel {
                    disruption_type: Set(input.kind.to_string()),
                    severity: Set(input.severity),
                    affected: Set(input.affected),
                    attributes: Set(input.attributes),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.storage.connection())
                .await?;

                tracing::info!(
                    "recorded {} disruption '{}' with id {}",
                    obj.severity.to_value(),
                    obj.disruption_type,
                    obj.id
                );

                Ok(obj)
            })
            .await
    }

    async fn get(&self, id: i64) -> types::Result<Option<Model>> {
        self.storage
            .bounded("disruption.get", async {
                Ok(Entity::find_by_id(id)
                    .one(self.storage.connection())
                    .await?)
            })
            .await
    }

    async fn list(&self, filter: &DisruptionFilter, page: Page) -> types::Result<Vec<Model>> {
        let mut select = Entity::find();

        if let Some(kind) = &filter.kind {
            select = select.filter(Column::DisruptionType.eq(kind.as_str()));
        }

        if let Some(severity) = filter.severity {
            select = select.filter(Column::Severity.eq(severity));
        }

        let select = page.apply(
            select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
        );

        self.storage
            .bounded("disruption.list", async {
                Ok(select.all(self.storage.connection()).await?)
            })
            .await
    }

    async fn update(&self, id: i64, patch: DisruptionPatch) -> types::Result<Option<Model>> {
        patch.validate()?;

        self.storage
            .bounded("disruption.update", async {
                let tx = self.storage.connection().begin().await?;

                let mut model = match Entity::find_by_id(id).one(&tx).await? {
                    Some(v) => v.into_active_model(),
                    None => return Ok(None),
                };

                if let Some(v) = patch.severity {
                    model.severity = Set(v);
                }
                if let Some(v) = patch.affected {
                    model.affected = Set(v);
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
            .bounded("disruption.delete", async {
                let result = Entity::delete_by_id(id)
                    .exec(self.storage.connection())
                    .await?;

                Ok(result.rows_affected > 0)
            })
            .await
    }
}
