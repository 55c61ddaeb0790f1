use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, Json};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};

use crate::database::entities::{developers, games, genres, platforms, publishers};
use crate::errors::InventoryError;
use crate::server::app::AppState;
use crate::server::views;

/// Home page: record counts for every entity type, gathered concurrently.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, InventoryError> {
    let db = &state.db;
    let (game_count, genre_count, platform_count, developer_count, publisher_count) = tokio::try_join!(
        games::Entity::find().count(db),
        genres::Entity::find().count(db),
        platforms::Entity::find().count(db),
        developers::Entity::find().count(db),
        publishers::Entity::find().count(db),
    )?;

    views::page(
        "index",
        &json!({
            "title": "Videogame Inventory",
            "game_count": game_count,
            "genre_count": genre_count,
            "platform_count": platform_count,
            "developer_count": developer_count,
            "publisher_count": publisher_count,
        }),
    )
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> InventoryError {
    InventoryError::not_found("Page", uri.path())
}
