//! Generic CRUD service for the name-only entities (Genre, Platform).

use std::marker::PhantomData;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::database::entities::games;
use crate::errors::{InventoryError, InventoryResult};
use crate::server::forms::FormData;
use crate::services::catalog::{self, ListItem, TagEntity};
use crate::validation::{self, ValidationErrors};

pub struct TagService<E: TagEntity> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: TagEntity> TagService<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> InventoryResult<Vec<ListItem>> {
        Ok(catalog::list::<E>(&self.db).await?)
    }

    pub async fn find(&self, id: Uuid) -> InventoryResult<E::Model> {
        catalog::find_by_id::<E>(&self.db, id).await
    }

    /// The record plus every game citing it, read concurrently.
    pub async fn detail(&self, id: Uuid) -> InventoryResult<(E::Model, Vec<games::Model>)> {
        let (tag, games) = tokio::try_join!(self.find(id), async {
            E::games_citing(&self.db, id).await.map_err(InventoryError::from)
        })?;
        Ok((tag, games))
    }

    pub async fn create(&self, form: &FormData) -> InventoryResult<E::Model> {
        let name = self.validated_name(form, None).await?;
        Ok(E::insert_row(&self.db, Uuid::new_v4(), name).await?)
    }

    pub async fn update(&self, id: Uuid, form: &FormData) -> InventoryResult<E::Model> {
        let current = self.find(id).await?;
        let name = self.validated_name(form, Some(&current)).await?;
        Ok(E::rename_row(&self.db, current, name).await?)
    }

    /// Removes the record and, in the same transaction, drops its identifier
    /// from every game's reference set.
    pub async fn delete(&self, id: Uuid) -> InventoryResult<()> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        let detached = E::detach_from_games(&txn, id)
            .await
            .map_err(|source| InventoryError::integrity(E::KIND_TITLE, id, source))?;
        E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!("Deleted {} {}; removed {} game references", E::KIND, id, detached);
        Ok(())
    }

    /// Runs the full name rule chain; uniqueness is waived when an update
    /// resubmits the stored name unchanged.
    async fn validated_name(
        &self,
        form: &FormData,
        current: Option<&E::Model>,
    ) -> InventoryResult<String> {
        let mut errors = ValidationErrors::new();
        let name = validation::required_name(&mut errors, "name", form.value("name"), E::NAME_MIN);

        if let Some(name) = &name {
            let unchanged = current.map_or(false, |row| E::name_of(row) == name.as_str());
            if !unchanged {
                let exempt = current.map(|row| E::id_of(row));
                if catalog::name_in_use::<E>(&self.db, name, exempt).await? {
                    errors.push("name", "Name is already in use");
                }
            }
        }

        match name {
            Some(name) if errors.is_empty() => Ok(name),
            _ => Err(InventoryError::Validation(errors)),
        }
    }
}
