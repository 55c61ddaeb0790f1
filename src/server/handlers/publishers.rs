use axum::extract::{Path, RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{json, Value};

use crate::database::entities::publishers;
use crate::errors::InventoryError;
use crate::server::app::AppState;
use crate::server::forms::FormData;
use crate::server::handlers::game_links;
use crate::server::views;
use crate::services::publisher_service::PublisherService;
use crate::validation::{parse_id, ValidationErrors};

fn service(state: &AppState) -> PublisherService {
    PublisherService::new(state.db.clone(), state.years)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id("Publisher", &id)?;
    let (publisher, games) = service(&state).detail(id).await?;

    views::page(
        "company_detail",
        &json!({
            "title": format!("Publisher: {}", publisher.name),
            "name": publisher.name,
            "time_of_creation": publisher.time_of_creation,
            "url": publisher.url(),
            "games": game_links(&games),
        }),
    )
}

pub async fn create_form() -> Result<Html<String>, InventoryError> {
    views::page("company_form", &form_payload(None, "", "", None))
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let form = FormData::parse(&body);
    match service(&state).create(&form).await {
        Ok(publisher) => Ok(Redirect::to(&publisher.url()).into_response()),
        Err(InventoryError::Validation(errors)) => Ok(views::page(
            "company_form",
            &form_payload(
                None,
                form.value("name").unwrap_or_default(),
                form.value("time_of_creation").unwrap_or_default(),
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
    let id = parse_id("Publisher", &id)?;
    let publisher = service(&state).find(id).await?;
    let year = publisher
        .time_of_creation
        .map(|year| year.to_string())
        .unwrap_or_default();

    views::page(
        "company_form",
        &form_payload(Some(&publisher), &publisher.name, &year, None),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError> {
    let id = parse_id("Publisher", &id)?;
    let form = FormData::parse(&body);
    match service(&state).update(id, &form).await {
        Ok(publisher) => Ok(Redirect::to(&publisher.url()).into_response()),
        Err(InventoryError::Validation(errors)) => {
            let current = service(&state).find(id).await?;
            Ok(views::page(
                "company_form",
                &form_payload(
                    Some(&current),
                    form.value("name").unwrap_or_default(),
                    form.value("time_of_creation").unwrap_or_default(),
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
    let id = parse_id("Publisher", &id)?;
    let (publisher, games) = service(&state).detail(id).await?;

    views::page(
        "delete_confirm",
        &json!({
            "title": "Delete Publisher",
            "kind": "publisher",
            "name": publisher.name,
            "dependents": game_links(&games),
            "action": format!("/publisher/{}/delete", id),
            "cancel_url": publisher.url(),
        }),
    )
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, InventoryError> {
    let id = parse_id("Publisher", &id)?;
    service(&state).delete(id).await?;
    Ok(Redirect::to("/publishers"))
}

fn form_payload(
    current: Option<&publishers::Model>,
    name: &str,
    year: &str,
    errors: Option<&ValidationErrors>,
) -> Value {
    let (title, action) = match current {
        Some(publisher) => (
            "Update Publisher".to_string(),
            format!("/publisher/{}/update", publisher.id),
        ),
        None => ("Create Publisher".to_string(), "/publisher/create".to_string()),
    };
    json!({
        "title": title,
        "action": action,
        "values": { "name": name, "time_of_creation": year },
        "errors": errors.map(|errors| errors.flatten()),
    })
}
