use axum::extract::{Path, RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::InventoryError;
use crate::server::app::AppState;
use crate::server::forms::FormData;
use crate::server::views;
use crate::services::catalog::ListItem;
use crate::services::game_service::{GameDetail, GameFormContext, GameService};
use crate::validation::{parse_id, ValidationErrors};

fn service(state: &AppState) -> GameService {
    GameService::new(state.db.clone(), state.years)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Game", &id)?;
    let detail = service(&state).detail(id).await?;
    let game = &detail.game;

    views::page(
        "game_detail",
        &json!({
            "title": format!("Game: {}", game.name),
            "name": game.name,
            "description": game.description,
            "time_of_creation": game.time_of_creation,
            "url": game.url(),
            "developer": detail
                .developer
                .as_ref()
                .map(|developer| json!({ "name": developer.name, "url": developer.url() })),
            "publisher": detail
                .publisher
                .as_ref()
                .map(|publisher| json!({ "name": publisher.name, "url": publisher.url() })),
            "genres": detail
                .genres
                .iter()
                .map(|genre| json!({ "name": genre.name, "url": genre.url() }))
                .collect::<Vec<_>>(),
            "platforms": detail
                .platforms
                .iter()
                .map(|platform| json!({ "name": platform.name, "url": platform.url() }))
                .collect::<Vec<_>>(),
        }),
    )
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, InventoryError> {
    let context = service(&state).form_context().await?;
    views::page(
        "game_form",
        &form_payload(None, &context, &FormSeed::default(), None),
    )
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let form = FormData::parse(&body);
    match service(&state).create(&form).await {
        Ok(game) => Ok(Redirect::to(&game.url()).into_response()),
        Err(InventoryError::Validation(errors)) => {
            let context = service(&state).form_context().await?;
            Ok(views::page(
                "game_form",
                &form_payload(None, &context, &FormSeed::from_form(&form), Some(&errors)),
            )?
            .into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Game", &id)?;
    let svc = service(&state);
    let (detail, context) = tokio::try_join!(svc.detail(id), svc.form_context())?;

    views::page(
        "game_form",
        &form_payload(Some(id), &context, &FormSeed::from_detail(&detail), None),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let id = parse_id("Game", &id)?;
    let form = FormData::parse(&body);
    match service(&state).update(id, &form).await {
        Ok(game) => Ok(Redirect::to(&game.url()).into_response()),
        Err(InventoryError::Validation(errors)) => {
            let context = service(&state).form_context().await?;
            Ok(views::page(
                "game_form",
                &form_payload(
                    Some(id),
                    &context,
                    &FormSeed::from_form(&form),
                    Some(&errors),
                ),
            )?
            .into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Game", &id)?;
    let game = service(&state).find(id).await?;

    // Nothing references a game, so there are no dependents to warn about.
    views::page(
        "delete_confirm",
        &json!({
            "title": "Delete Game",
            "kind": "game",
            "name": game.name,
            "dependents": [],
            "action": format!("/game/{}/delete", id),
            "cancel_url": game.url(),
        }),
    )
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, InventoryError> {
    let id = parse_id("Game", &id)?;
    service(&state).delete(id).await?;
    Ok(Redirect::to("/games"))
}

/// Field state echoed into the form: either a failed submission or the
/// stored record being updated.
#[derive(Default)]
struct FormSeed {
    name: String,
    time_of_creation: String,
    description: String,
    genres: Vec<String>,
    platforms: Vec<String>,
    developer: String,
    publisher: String,
}

impl FormSeed {
    fn from_form(form: &FormData) -> Self {
        Self {
            name: form.value("name").unwrap_or_default().to_string(),
            time_of_creation: form.value("time_of_creation").unwrap_or_default().to_string(),
            description: form.value("description").unwrap_or_default().to_string(),
            genres: form.values("genre").to_vec(),
            platforms: form.values("platform").to_vec(),
            developer: form.value("developer").unwrap_or_default().to_string(),
            publisher: form.value("publisher").unwrap_or_default().to_string(),
        }
    }

    fn from_detail(detail: &GameDetail) -> Self {
        Self {
            name: detail.game.name.clone(),
            time_of_creation: detail
                .game
                .time_of_creation
                .map(|year| year.to_string())
                .unwrap_or_default(),
            description: detail.game.description.clone(),
            genres: detail.genres.iter().map(|genre| genre.id.to_string()).collect(),
            platforms: detail
                .platforms
                .iter()
                .map(|platform| platform.id.to_string())
                .collect(),
            developer: detail
                .game
                .developer_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            publisher: detail
                .game
                .publisher_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

fn form_payload(
    id: Option<Uuid>,
    context: &GameFormContext,
    seed: &FormSeed,
    errors: Option<&ValidationErrors>,
) -> Value {
    let (title, action) = match id {
        Some(id) => ("Update Game".to_string(), format!("/game/{}/update", id)),
        None => ("Create Game".to_string(), "/game/create".to_string()),
    };
    json!({
        "title": title,
        "action": action,
        "values": {
            "name": seed.name,
            "time_of_creation": seed.time_of_creation,
            "description": seed.description,
        },
        "genres": mark_checked(&context.genres, &seed.genres),
        "platforms": mark_checked(&context.platforms, &seed.platforms),
        "developers": mark_selected(&context.developers, &seed.developer),
        "publishers": mark_selected(&context.publishers, &seed.publisher),
        "errors": errors.map(|errors| errors.flatten()),
    })
}

fn mark_checked(items: &[ListItem], selected: &[String]) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            let id = item.id.to_string();
            json!({
                "id": id,
                "name": item.name,
                "checked": selected.iter().any(|value| value == &id),
            })
        })
        .collect()
}

fn mark_selected(items: &[ListItem], selected: &str) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            let id = item.id.to_string();
            json!({
                "id": id,
                "name": item.name,
                "selected": selected == id,
            })
        })
        .collect()
}
