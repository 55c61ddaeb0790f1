use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Value,
};
use tracing::info;
use uuid::Uuid;

use crate::database::entities::{games, publishers};
use crate::errors::{InventoryError, InventoryResult};
use crate::server::forms::FormData;
use crate::services::catalog;
use crate::validation::{self, ValidationErrors, YearBounds};

pub struct PublisherService {
    db: DatabaseConnection,
    years: YearBounds,
}

impl PublisherService {
    pub fn new(db: DatabaseConnection, years: YearBounds) -> Self {
        Self { db, years }
    }

    pub async fn find(&self, id: Uuid) -> InventoryResult<publishers::Model> {
        catalog::find_by_id::<publishers::Entity>(&self.db, id).await
    }

    pub async fn detail(
        &self,
        id: Uuid,
    ) -> InventoryResult<(publishers::Model, Vec<games::Model>)> {
        let (publisher, games) = tokio::try_join!(self.find(id), async {
            games::Entity::find()
                .filter(games::Column::PublisherId.eq(id))
                .order_by_asc(games::Column::Name)
                .all(&self.db)
                .await
                .map_err(InventoryError::from)
        })?;
        Ok((publisher, games))
    }

    pub async fn create(&self, form: &FormData) -> InventoryResult<publishers::Model> {
        let fields = self.validated_fields(form, None).await?;
        let row = publishers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(fields.name),
            time_of_creation: Set(fields.time_of_creation),
        };
        Ok(row.insert(&self.db).await?)
    }

    pub async fn update(&self, id: Uuid, form: &FormData) -> InventoryResult<publishers::Model> {
        let current = self.find(id).await?;
        let fields = self.validated_fields(form, Some(&current)).await?;

        let mut row: publishers::ActiveModel = current.into();
        row.name = Set(fields.name);
        row.time_of_creation = Set(fields.time_of_creation);
        Ok(row.update(&self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> InventoryResult<()> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        let cleared = games::Entity::update_many()
            .col_expr(games::Column::PublisherId, Expr::value(Value::Uuid(None)))
            .filter(games::Column::PublisherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|source| InventoryError::integrity("Publisher", id, source))?;
        publishers::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            "Deleted publisher {}; cleared {} game references",
            id, cleared.rows_affected
        );
        Ok(())
    }

    async fn validated_fields(
        &self,
        form: &FormData,
        current: Option<&publishers::Model>,
    ) -> InventoryResult<PublisherFields> {
        let mut errors = ValidationErrors::new();
        let name = validation::required_name(&mut errors, "name", form.value("name"), 1);
        let time_of_creation = validation::optional_year(
            &mut errors,
            "time_of_creation",
            form.value("time_of_creation"),
            self.years,
        );

        if let Some(name) = &name {
            let unchanged = current.map_or(false, |row| &row.name == name);
            if !unchanged
                && catalog::name_in_use::<publishers::Entity>(
                    &self.db,
                    name,
                    current.map(|row| row.id),
                )
                .await?
            {
                errors.push("name", "Name is already in use");
            }
        }

        match name {
            Some(name) if errors.is_empty() => Ok(PublisherFields {
                name,
                time_of_creation,
            }),
            _ => Err(InventoryError::Validation(errors)),
        }
    }
}

struct PublisherFields {
    name: String,
    time_of_creation: Option<i32>,
}
