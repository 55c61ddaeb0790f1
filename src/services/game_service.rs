use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::database::entities::{
    developers, game_genres, game_platforms, games, genres, platforms, publishers,
};
use crate::errors::{InventoryError, InventoryResult};
use crate::server::forms::FormData;
use crate::services::catalog::{self, ListItem};
use crate::validation::{self, ValidationErrors, YearBounds};

/// A game with its referenced records resolved for display.
pub struct GameDetail {
    pub game: games::Model,
    pub genres: Vec<genres::Model>,
    pub platforms: Vec<platforms::Model>,
    pub developer: Option<developers::Model>,
    pub publisher: Option<publishers::Model>,
}

/// Reference lists the create/update form needs to populate its selection
/// fields.
pub struct GameFormContext {
    pub genres: Vec<ListItem>,
    pub platforms: Vec<ListItem>,
    pub developers: Vec<ListItem>,
    pub publishers: Vec<ListItem>,
}

pub struct GameService {
    db: DatabaseConnection,
    years: YearBounds,
}

impl GameService {
    pub fn new(db: DatabaseConnection, years: YearBounds) -> Self {
        Self { db, years }
    }

    pub async fn find(&self, id: Uuid) -> InventoryResult<games::Model> {
        catalog::find_by_id::<games::Entity>(&self.db, id).await
    }

    /// The game plus its references, the reads issued concurrently.
    pub async fn detail(&self, id: Uuid) -> InventoryResult<GameDetail> {
        let game = self.find(id).await?;

        let (genres, platforms, developer, publisher) = tokio::try_join!(
            game.find_related(genres::Entity)
                .order_by_asc(genres::Column::Name)
                .all(&self.db),
            game.find_related(platforms::Entity)
                .order_by_asc(platforms::Column::Name)
                .all(&self.db),
            async {
                match game.developer_id {
                    Some(developer_id) => {
                        developers::Entity::find_by_id(developer_id).one(&self.db).await
                    }
                    None => Ok(None),
                }
            },
            async {
                match game.publisher_id {
                    Some(publisher_id) => {
                        publishers::Entity::find_by_id(publisher_id).one(&self.db).await
                    }
                    None => Ok(None),
                }
            },
        )?;

        Ok(GameDetail {
            game,
            genres,
            platforms,
            developer,
            publisher,
        })
    }

    /// All four reference lists, read concurrently.
    pub async fn form_context(&self) -> InventoryResult<GameFormContext> {
        let (genres, platforms, developers, publishers) = tokio::try_join!(
            catalog::list::<genres::Entity>(&self.db),
            catalog::list::<platforms::Entity>(&self.db),
            catalog::list::<developers::Entity>(&self.db),
            catalog::list::<publishers::Entity>(&self.db),
        )?;
        Ok(GameFormContext {
            genres,
            platforms,
            developers,
            publishers,
        })
    }

    pub async fn create(&self, form: &FormData) -> InventoryResult<games::Model> {
        let fields = self.validated_fields(form, None).await?;

        let txn = self.db.begin().await?;
        let game = games::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(fields.name),
            time_of_creation: Set(fields.time_of_creation),
            description: Set(fields.description),
            developer_id: Set(fields.developer_id),
            publisher_id: Set(fields.publisher_id),
        }
        .insert(&txn)
        .await?;
        attach_references(&txn, game.id, &fields.genre_ids, &fields.platform_ids).await?;
        txn.commit().await?;

        Ok(game)
    }

    pub async fn update(&self, id: Uuid, form: &FormData) -> InventoryResult<games::Model> {
        let current = self.find(id).await?;
        let fields = self.validated_fields(form, Some(&current)).await?;

        let txn = self.db.begin().await?;
        let mut row: games::ActiveModel = current.into();
        row.name = Set(fields.name);
        row.time_of_creation = Set(fields.time_of_creation);
        row.description = Set(fields.description);
        row.developer_id = Set(fields.developer_id);
        row.publisher_id = Set(fields.publisher_id);
        let game = row.update(&txn).await?;

        // Reference sets are replaced wholesale with the submitted lists.
        game_genres::Entity::delete_many()
            .filter(game_genres::Column::GameId.eq(id))
            .exec(&txn)
            .await?;
        game_platforms::Entity::delete_many()
            .filter(game_platforms::Column::GameId.eq(id))
            .exec(&txn)
            .await?;
        attach_references(&txn, id, &fields.genre_ids, &fields.platform_ids).await?;
        txn.commit().await?;

        Ok(game)
    }

    pub async fn delete(&self, id: Uuid) -> InventoryResult<()> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        game_genres::Entity::delete_many()
            .filter(game_genres::Column::GameId.eq(id))
            .exec(&txn)
            .await?;
        game_platforms::Entity::delete_many()
            .filter(game_platforms::Column::GameId.eq(id))
            .exec(&txn)
            .await?;
        games::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn validated_fields(
        &self,
        form: &FormData,
        current: Option<&games::Model>,
    ) -> InventoryResult<GameFields> {
        let mut errors = ValidationErrors::new();
        let name = validation::required_name(&mut errors, "name", form.value("name"), 1);
        let time_of_creation = validation::optional_year(
            &mut errors,
            "time_of_creation",
            form.value("time_of_creation"),
            self.years,
        );
        let description = validation::optional_text(form.value("description"), "N/A");
        let genre_ids = validation::reference_list(&mut errors, "genre", form.values("genre"));
        let platform_ids =
            validation::reference_list(&mut errors, "platform", form.values("platform"));
        let developer_id =
            validation::optional_reference(&mut errors, "developer", form.value("developer"));
        let publisher_id =
            validation::optional_reference(&mut errors, "publisher", form.value("publisher"));

        if let Some(name) = &name {
            let unchanged = current.map_or(false, |row| &row.name == name);
            if !unchanged
                && catalog::name_in_use::<games::Entity>(&self.db, name, current.map(|row| row.id))
                    .await?
            {
                errors.push("name", "Name is already in use");
            }
        }

        match name {
            Some(name) if errors.is_empty() => Ok(GameFields {
                name,
                time_of_creation,
                description,
                genre_ids,
                platform_ids,
                developer_id,
                publisher_id,
            }),
            _ => Err(InventoryError::Validation(errors)),
        }
    }
}

struct GameFields {
    name: String,
    time_of_creation: Option<i32>,
    description: String,
    genre_ids: Vec<Uuid>,
    platform_ids: Vec<Uuid>,
    developer_id: Option<Uuid>,
    publisher_id: Option<Uuid>,
}

async fn attach_references<C: ConnectionTrait>(
    conn: &C,
    game_id: Uuid,
    genre_ids: &[Uuid],
    platform_ids: &[Uuid],
) -> Result<(), DbErr> {
    if !genre_ids.is_empty() {
        let rows = genre_ids.iter().map(|&genre_id| game_genres::ActiveModel {
            game_id: Set(game_id),
            genre_id: Set(genre_id),
        });
        game_genres::Entity::insert_many(rows).exec(conn).await?;
    }
    if !platform_ids.is_empty() {
        let rows = platform_ids
            .iter()
            .map(|&platform_id| game_platforms::ActiveModel {
                game_id: Set(game_id),
                platform_id: Set(platform_id),
            });
        game_platforms::Entity::insert_many(rows).exec(conn).await?;
    }
    Ok(())
}
