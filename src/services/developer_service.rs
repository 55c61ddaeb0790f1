use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Value,
};
use tracing::info;
use uuid::Uuid;

use crate::database::entities::{developers, games};
use crate::errors::{InventoryError, InventoryResult};
use crate::server::forms::FormData;
use crate::services::catalog;
use crate::validation::{self, ValidationErrors, YearBounds};

pub const DEVELOPER_TYPES: &[&str] = &["N/A", "Indie", "Studio"];

pub struct DeveloperService {
    db: DatabaseConnection,
    years: YearBounds,
}

impl DeveloperService {
    pub fn new(db: DatabaseConnection, years: YearBounds) -> Self {
        Self { db, years }
    }

    pub async fn find(&self, id: Uuid) -> InventoryResult<developers::Model> {
        catalog::find_by_id::<developers::Entity>(&self.db, id).await
    }

    /// The developer plus every game naming it, read concurrently.
    pub async fn detail(
        &self,
        id: Uuid,
    ) -> InventoryResult<(developers::Model, Vec<games::Model>)> {
        let (developer, games) = tokio::try_join!(self.find(id), async {
            games::Entity::find()
                .filter(games::Column::DeveloperId.eq(id))
                .order_by_asc(games::Column::Name)
                .all(&self.db)
                .await
                .map_err(InventoryError::from)
        })?;
        Ok((developer, games))
    }

    pub async fn create(&self, form: &FormData) -> InventoryResult<developers::Model> {
        let fields = self.validated_fields(form, None).await?;
        let row = developers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(fields.name),
            kind: Set(fields.kind),
            time_of_creation: Set(fields.time_of_creation),
        };
        Ok(row.insert(&self.db).await?)
    }

    pub async fn update(&self, id: Uuid, form: &FormData) -> InventoryResult<developers::Model> {
        let current = self.find(id).await?;
        let fields = self.validated_fields(form, Some(&current)).await?;

        let mut row: developers::ActiveModel = current.into();
        row.name = Set(fields.name);
        row.kind = Set(fields.kind);
        row.time_of_creation = Set(fields.time_of_creation);
        Ok(row.update(&self.db).await?)
    }

    /// Removes the developer and, in the same transaction, clears the
    /// reference on every game naming it.
    pub async fn delete(&self, id: Uuid) -> InventoryResult<()> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        let cleared = games::Entity::update_many()
            .col_expr(games::Column::DeveloperId, Expr::value(Value::Uuid(None)))
            .filter(games::Column::DeveloperId.eq(id))
            .exec(&txn)
            .await
            .map_err(|source| InventoryError::integrity("Developer", id, source))?;
        developers::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            "Deleted developer {}; cleared {} game references",
            id, cleared.rows_affected
        );
        Ok(())
    }

    async fn validated_fields(
        &self,
        form: &FormData,
        current: Option<&developers::Model>,
    ) -> InventoryResult<DeveloperFields> {
        let mut errors = ValidationErrors::new();
        let name = validation::required_name(&mut errors, "name", form.value("name"), 1);
        let kind = validation::member_of(&mut errors, "type", form.value("type"), DEVELOPER_TYPES);
        let time_of_creation = validation::optional_year(
            &mut errors,
            "time_of_creation",
            form.value("time_of_creation"),
            self.years,
        );

        if let Some(name) = &name {
            let unchanged = current.map_or(false, |row| &row.name == name);
            if !unchanged
                && catalog::name_in_use::<developers::Entity>(
                    &self.db,
                    name,
                    current.map(|row| row.id),
                )
                .await?
            {
                errors.push("name", "Name is already in use");
            }
        }

        match (name, kind) {
            (Some(name), Some(kind)) if errors.is_empty() => Ok(DeveloperFields {
                name,
                kind,
                time_of_creation,
            }),
            _ => Err(InventoryError::Validation(errors)),
        }
    }
}

struct DeveloperFields {
    name: String,
    kind: String,
    time_of_creation: Option<i32>,
}
