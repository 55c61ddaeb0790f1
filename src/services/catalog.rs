//! CRUD-over-schema plumbing shared by every entity type.
//!
//! [`CatalogEntity`] gives generic code typed access to the two columns all
//! catalog pages need; [`TagEntity`] extends it for the name-only entities
//! (Genre, Platform) whose pages are identical in shape and differ only in
//! which reference-set table joins them to games.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::database::entities::{
    developers, game_genres, game_platforms, games, genres, platforms, publishers,
};
use crate::errors::{InventoryError, InventoryResult};

pub trait CatalogEntity: EntityTrait {
    /// URL path segment, e.g. "genre".
    const KIND: &'static str;
    /// Display name, e.g. "Genre".
    const KIND_TITLE: &'static str;
    /// Plural path segment for list pages.
    const KIND_PLURAL: &'static str;
    /// Plural display name.
    const KIND_TITLE_PLURAL: &'static str;

    fn id_column() -> Self::Column;
    fn name_column() -> Self::Column;
    fn id_of(model: &Self::Model) -> Uuid;
    fn name_of(model: &Self::Model) -> &str;

    fn url_of(model: &Self::Model) -> String {
        format!("/{}/{}", Self::KIND, Self::id_of(model))
    }
}

/// Identifier+name projection used by every list view; detail fields are
/// deliberately not loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

pub async fn list<E: CatalogEntity>(db: &DatabaseConnection) -> Result<Vec<ListItem>, DbErr> {
    let rows: Vec<(Uuid, String)> = E::find()
        .select_only()
        .column(E::id_column())
        .column(E::name_column())
        .order_by_asc(E::name_column())
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| ListItem {
            url: format!("/{}/{}", E::KIND, id),
            id,
            name,
        })
        .collect())
}

pub async fn find_by_id<E: CatalogEntity>(
    db: &DatabaseConnection,
    id: Uuid,
) -> InventoryResult<E::Model> {
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| InventoryError::not_found(E::KIND_TITLE, id.to_string()))
}

/// Server-side uniqueness probe. `exempt` carries the record's own id on
/// updates so an unchanged name is not rejected against itself.
pub async fn name_in_use<E: CatalogEntity>(
    db: &DatabaseConnection,
    name: &str,
    exempt: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut query = E::find().filter(E::name_column().eq(name));
    if let Some(id) = exempt {
        query = query.filter(E::id_column().ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

/// The name-only entities sharing one generic handler/service set.
#[async_trait]
pub trait TagEntity: CatalogEntity {
    /// Minimum accepted name length.
    const NAME_MIN: usize;

    async fn insert_row(
        db: &DatabaseConnection,
        id: Uuid,
        name: String,
    ) -> Result<Self::Model, DbErr>;

    async fn rename_row(
        db: &DatabaseConnection,
        row: Self::Model,
        name: String,
    ) -> Result<Self::Model, DbErr>;

    /// Games citing this record, in name order.
    async fn games_citing(db: &DatabaseConnection, id: Uuid) -> Result<Vec<games::Model>, DbErr>;

    /// Drops the identifier from every game's reference set, leaving the
    /// other members alone.
    async fn detach_from_games<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<u64, DbErr>;
}

impl CatalogEntity for genres::Entity {
    const KIND: &'static str = "genre";
    const KIND_TITLE: &'static str = "Genre";
    const KIND_PLURAL: &'static str = "genres";
    const KIND_TITLE_PLURAL: &'static str = "Genres";

    fn id_column() -> Self::Column {
        genres::Column::Id
    }

    fn name_column() -> Self::Column {
        genres::Column::Name
    }

    fn id_of(model: &Self::Model) -> Uuid {
        model.id
    }

    fn name_of(model: &Self::Model) -> &str {
        &model.name
    }
}

#[async_trait]
impl TagEntity for genres::Entity {
    const NAME_MIN: usize = 3;

    async fn insert_row(
        db: &DatabaseConnection,
        id: Uuid,
        name: String,
    ) -> Result<Self::Model, DbErr> {
        use sea_orm::ActiveModelTrait;
        genres::ActiveModel {
            id: Set(id),
            name: Set(name),
        }
        .insert(db)
        .await
    }

    async fn rename_row(
        db: &DatabaseConnection,
        row: Self::Model,
        name: String,
    ) -> Result<Self::Model, DbErr> {
        use sea_orm::ActiveModelTrait;
        let mut row: genres::ActiveModel = row.into();
        row.name = Set(name);
        row.update(db).await
    }

    async fn games_citing(db: &DatabaseConnection, id: Uuid) -> Result<Vec<games::Model>, DbErr> {
        games::Entity::find()
            .join(JoinType::InnerJoin, game_genres::Relation::Games.def().rev())
            .filter(game_genres::Column::GenreId.eq(id))
            .order_by_asc(games::Column::Name)
            .all(db)
            .await
    }

    async fn detach_from_games<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<u64, DbErr> {
        let result = game_genres::Entity::delete_many()
            .filter(game_genres::Column::GenreId.eq(id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}

impl CatalogEntity for platforms::Entity {
    const KIND: &'static str = "platform";
    const KIND_TITLE: &'static str = "Platform";
    const KIND_PLURAL: &'static str = "platforms";
    const KIND_TITLE_PLURAL: &'static str = "Platforms";

    fn id_column() -> Self::Column {
        platforms::Column::Id
    }

    fn name_column() -> Self::Column {
        platforms::Column::Name
    }

    fn id_of(model: &Self::Model) -> Uuid {
        model.id
    }

    fn name_of(model: &Self::Model) -> &str {
        &model.name
    }
}

#[async_trait]
impl TagEntity for platforms::Entity {
    const NAME_MIN: usize = 1;

    async fn insert_row(
        db: &DatabaseConnection,
        id: Uuid,
        name: String,
    ) -> Result<Self::Model, DbErr> {
        use sea_orm::ActiveModelTrait;
        platforms::ActiveModel {
            id: Set(id),
            name: Set(name),
        }
        .insert(db)
        .await
    }

    async fn rename_row(
        db: &DatabaseConnection,
        row: Self::Model,
        name: String,
    ) -> Result<Self::Model, DbErr> {
        use sea_orm::ActiveModelTrait;
        let mut row: platforms::ActiveModel = row.into();
        row.name = Set(name);
        row.update(db).await
    }

    async fn games_citing(db: &DatabaseConnection, id: Uuid) -> Result<Vec<games::Model>, DbErr> {
        games::Entity::find()
            .join(
                JoinType::InnerJoin,
                game_platforms::Relation::Games.def().rev(),
            )
            .filter(game_platforms::Column::PlatformId.eq(id))
            .order_by_asc(games::Column::Name)
            .all(db)
            .await
    }

    async fn detach_from_games<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<u64, DbErr> {
        let result = game_platforms::Entity::delete_many()
            .filter(game_platforms::Column::PlatformId.eq(id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}

impl CatalogEntity for developers::Entity {
    const KIND: &'static str = "developer";
    const KIND_TITLE: &'static str = "Developer";
    const KIND_PLURAL: &'static str = "developers";
    const KIND_TITLE_PLURAL: &'static str = "Developers";

    fn id_column() -> Self::Column {
        developers::Column::Id
    }

    fn name_column() -> Self::Column {
        developers::Column::Name
    }

    fn id_of(model: &Self::Model) -> Uuid {
        model.id
    }

    fn name_of(model: &Self::Model) -> &str {
        &model.name
    }
}

impl CatalogEntity for publishers::Entity {
    const KIND: &'static str = "publisher";
    const KIND_TITLE: &'static str = "Publisher";
    const KIND_PLURAL: &'static str = "publishers";
    const KIND_TITLE_PLURAL: &'static str = "Publishers";

    fn id_column() -> Self::Column {
        publishers::Column::Id
    }

    fn name_column() -> Self::Column {
        publishers::Column::Name
    }

    fn id_of(model: &Self::Model) -> Uuid {
        model.id
    }

    fn name_of(model: &Self::Model) -> &str {
        &model.name
    }
}

impl CatalogEntity for games::Entity {
    const KIND: &'static str = "game";
    const KIND_TITLE: &'static str = "Game";
    const KIND_PLURAL: &'static str = "games";
    const KIND_TITLE_PLURAL: &'static str = "Games";

    fn id_column() -> Self::Column {
        games::Column::Id
    }

    fn name_column() -> Self::Column {
        games::Column::Name
    }

    fn id_of(model: &Self::Model) -> Uuid {
        model.id
    }

    fn name_of(model: &Self::Model) -> &str {
        &model.name
    }
}
