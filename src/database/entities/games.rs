use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub time_of_creation: Option<i32>,
    pub description: String,
    pub developer_id: Option<Uuid>,
    pub publisher_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::developers::Entity",
        from = "Column::DeveloperId",
        to = "super::developers::Column::Id"
    )]
    Developers,
    #[sea_orm(
        belongs_to = "super::publishers::Entity",
        from = "Column::PublisherId",
        to = "super::publishers::Column::Id"
    )]
    Publishers,
    #[sea_orm(has_many = "super::game_genres::Entity")]
    GameGenres,
    #[sea_orm(has_many = "super::game_platforms::Entity")]
    GamePlatforms,
}

impl Related<super::developers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Developers.def()
    }
}

impl Related<super::publishers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Publishers.def()
    }
}

impl Related<super::game_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameGenres.def()
    }
}

impl Related<super::game_platforms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePlatforms.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_genres::Relation::Genres.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_genres::Relation::Games.def().rev())
    }
}

impl Related<super::platforms::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_platforms::Relation::Platforms.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_platforms::Relation::Games.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn url(&self) -> String {
        format!("/game/{}", self.id)
    }
}
