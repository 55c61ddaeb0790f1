use axum::routing::get;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use super::handlers::{catalog, developers, games, index, publishers};
use crate::database::entities;
use crate::services::catalog::TagEntity;
use crate::validation::YearBounds;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Year-field bounds, derived from the clock once at startup.
    pub years: YearBounds,
}

pub fn create_app(db: DatabaseConnection) -> Router {
    let state = AppState {
        db,
        years: YearBounds::current(),
    };

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(index::health))
        .merge(tag_routes::<entities::genres::Entity>())
        .merge(tag_routes::<entities::platforms::Entity>())
        .route(
            "/developers",
            get(catalog::list_page::<entities::developers::Entity>),
        )
        .route(
            "/developer/create",
            get(developers::create_form).post(developers::create),
        )
        .route("/developer/:id", get(developers::detail))
        .route(
            "/developer/:id/delete",
            get(developers::delete_form).post(developers::delete),
        )
        .route(
            "/developer/:id/update",
            get(developers::update_form).post(developers::update),
        )
        .route(
            "/publishers",
            get(catalog::list_page::<entities::publishers::Entity>),
        )
        .route(
            "/publisher/create",
            get(publishers::create_form).post(publishers::create),
        )
        .route("/publisher/:id", get(publishers::detail))
        .route(
            "/publisher/:id/delete",
            get(publishers::delete_form).post(publishers::delete),
        )
        .route(
            "/publisher/:id/update",
            get(publishers::update_form).post(publishers::update),
        )
        .route("/games", get(catalog::list_page::<entities::games::Entity>))
        .route("/game/create", get(games::create_form).post(games::create))
        .route("/game/:id", get(games::detail))
        .route(
            "/game/:id/delete",
            get(games::delete_form).post(games::delete),
        )
        .route(
            "/game/:id/update",
            get(games::update_form).post(games::update),
        )
        .fallback(index::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One route group per name-only entity, instantiated from its definition.
fn tag_routes<E: TagEntity + 'static>() -> Router<AppState>
where
    E::Model: Sync,
{
    Router::new()
        .route(
            &format!("/{}", E::KIND_PLURAL),
            get(catalog::list_page::<E>),
        )
        .route(
            &format!("/{}/create", E::KIND),
            get(catalog::create_form::<E>).post(catalog::create::<E>),
        )
        .route(&format!("/{}/:id", E::KIND), get(catalog::detail::<E>))
        .route(
            &format!("/{}/:id/delete", E::KIND),
            get(catalog::delete_form::<E>).post(catalog::delete::<E>),
        )
        .route(
            &format!("/{}/:id/update", E::KIND),
            get(catalog::update_form::<E>).post(catalog::update::<E>),
        )
}
