use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_genres::Entity")]
    GameGenres,
}

impl Related<super::game_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameGenres.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_genres::Relation::Games.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_genres::Relation::Genres.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical path for links; derived, never stored.
    pub fn url(&self) -> String {
        format!("/genre/{}", self.id)
    }
}
