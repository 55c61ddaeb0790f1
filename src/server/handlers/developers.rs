use axum::extract::{Path, RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{json, Value};

use crate::database::entities::developers;
use crate::errors::InventoryError;
use crate::server::app::AppState;
use crate::server::forms::FormData;
use crate::server::handlers::game_links;
use crate::server::views;
use crate::services::developer_service::{DeveloperService, DEVELOPER_TYPES};
use crate::validation::{parse_id, ValidationErrors};

fn service(state: &AppState) -> DeveloperService {
    DeveloperService::new(state.db.clone(), state.years)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Developer", &id)?;
    let (developer, games) = service(&state).detail(id).await?;

    views::page(
        "company_detail",
        &json!({
            "title": format!("Developer: {}", developer.name),
            "name": developer.name,
            "type": developer.kind,
            "time_of_creation": developer.time_of_creation,
            "url": developer.url(),
            "games": game_links(&games),
        }),
    )
}

pub async fn create_form() -> Result<Html<String>, InventoryError> {
    views::page("company_form", &form_payload(None, "", "", None, None))
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let form = FormData::parse(&body);
    match service(&state).create(&form).await {
        Ok(developer) => Ok(Redirect::to(&developer.url()).into_response()),
        Err(InventoryError::Validation(errors)) => Ok(views::page(
            "company_form",
            &form_payload(
                None,
                form.value("name").unwrap_or_default(),
                form.value("time_of_creation").unwrap_or_default(),
                form.value("type"),
                Some(&errors),
            ),
        )?
        .into_response()),
        Err(err) => Err(err),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Developer", &id)?;
    let developer = service(&state).find(id).await?;
    let year = developer
        .time_of_creation
        .map(|year| year.to_string())
        .unwrap_or_default();

    views::page(
        "company_form",
        &form_payload(
            Some(&developer),
            &developer.name,
            &year,
            Some(developer.kind.as_str()),
            None,
        ),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let id = parse_id("Developer", &id)?;
    let form = FormData::parse(&body);
    match service(&state).update(id, &form).await {
        Ok(developer) => Ok(Redirect::to(&developer.url()).into_response()),
        Err(InventoryError::Validation(errors)) => {
            let current = service(&state).find(id).await?;
            Ok(views::page(
                "company_form",
                &form_payload(
                    Some(&current),
                    form.value("name").unwrap_or_default(),
                    form.value("time_of_creation").unwrap_or_default(),
                    form.value("type"),
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
    let id = parse_id("Developer", &id)?;
    let (developer, games) = service(&state).detail(id).await?;

    views::page(
        "delete_confirm",
        &json!({
            "title": "Delete Developer",
            "kind": "developer",
            "name": developer.name,
            "dependents": game_links(&games),
            "action": format!("/developer/{}/delete", id),
            "cancel_url": developer.url(),
        }),
    )
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, InventoryError> {
    let id = parse_id("Developer", &id)?;
    service(&state).delete(id).await?;
    Ok(Redirect::to("/developers"))
}

fn form_payload(
    current: Option<&developers::Model>,
    name: &str,
    year: &str,
    kind: Option<&str>,
    errors: Option<&ValidationErrors>,
) -> Value {
    let (title, action) = match current {
        Some(developer) => (
            "Update Developer".to_string(),
            format!("/developer/{}/update", developer.id),
        ),
        None => ("Create Developer".to_string(), "/developer/create".to_string()),
    };
    let types: Vec<Value> = DEVELOPER_TYPES
        .iter()
        .map(|value| json!({ "value": value, "selected": Some(*value) == kind }))
        .collect();
    json!({
        "title": title,
        "action": action,
        "values": { "name": name, "time_of_creation": year },
        "types": types,
        "errors": errors.map(|errors| errors.flatten()),
    })
}
