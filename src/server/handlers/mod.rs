pub mod catalog;
pub mod developers;
pub mod games;
pub mod index;
pub mod publishers;

use serde_json::{json, Value};

use crate::database::entities::games as game_records;

/// Name+link pairs for the "games referencing this record" blocks.
pub(crate) fn game_links(games: &[game_records::Model]) -> Vec<Value> {
    games
        .iter()
        .map(|game| json!({ "name": game.name, "url": game.url() }))
        .collect()
}
