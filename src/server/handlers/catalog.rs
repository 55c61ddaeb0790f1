//! Generic pages parameterized by entity definition.
//!
//! `list_page` serves every entity type; the remaining handlers cover the
//! name-only entities (Genre, Platform) and are instantiated per entity by
//! the router.

use axum::extract::{Path, RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;

use crate::errors::InventoryError;
use crate::server::app::AppState;
use crate::server::forms::FormData;
use crate::server::handlers::game_links;
use crate::server::views;
use crate::services::catalog::{self, CatalogEntity, TagEntity};
use crate::services::tag_service::TagService;
use crate::validation::parse_id;

pub async fn list_page<E: CatalogEntity>(
    State(state): State<AppState>,
) -> Result<Html<String>, InventoryError> {
    let items = catalog::list::<E>(&state.db).await?;
    views::page(
        "list",
        &json!({
            "title": format!("List of {}", E::KIND_TITLE_PLURAL),
            "kind": E::KIND,
            "create_url": format!("/{}/create", E::KIND),
            "items": items,
        }),
    )
}

pub async fn detail<E: TagEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id(E::KIND_TITLE, &id)?;
    let (tag, games) = TagService::<E>::new(state.db.clone()).detail(id).await?;

    views::page(
        "tag_detail",
        &json!({
            "title": format!("{}: {}", E::KIND_TITLE, E::name_of(&tag)),
            "name": E::name_of(&tag),
            "url": E::url_of(&tag),
            "games": game_links(&games),
        }),
    )
}

pub async fn create_form<E: TagEntity>() -> Result<Html<String>, InventoryError> {
    views::page("tag_form", &form_payload::<E>(None, "", None))
}

pub async fn create<E: TagEntity>(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError>
where
    E::Model: Sync,
{
    let form = FormData::parse(&body);
    match TagService::<E>::new(state.db.clone()).create(&form).await {
        Ok(tag) => Ok(Redirect::to(&E::url_of(&tag)).into_response()),
        Err(InventoryError::Validation(errors)) => Ok(views::page(
            "tag_form",
            &form_payload::<E>(None, form.value("name").unwrap_or_default(), Some(&errors)),
        )?
        .into_response()),
        Err(err) => Err(err),
    }
}

pub async fn update_form<E: TagEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id(E::KIND_TITLE, &id)?;
    let tag = TagService::<E>::new(state.db.clone()).find(id).await?;
    views::page(
        "tag_form",
        &form_payload::<E>(Some(id), E::name_of(&tag), None),
    )
}

pub async fn update<E: TagEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawForm(body): RawForm,
) -> Result<Response, InventoryError>
where
    E::Model: Sync,
{
    let id = parse_id(E::KIND_TITLE, &id)?;
    let form = FormData::parse(&body);
    match TagService::<E>::new(state.db.clone()).update(id, &form).await {
        Ok(tag) => Ok(Redirect::to(&E::url_of(&tag)).into_response()),
        Err(InventoryError::Validation(errors)) => Ok(views::page(
            "tag_form",
            &form_payload::<E>(
                Some(id),
                form.value("name").unwrap_or_default(),
                Some(&errors),
            ),
        )?
        .into_response()),
        Err(err) => Err(err),
    }
}

pub async fn delete_form<E: TagEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, InventoryError> {
    let id = parse_id(E::KIND_TITLE, &id)?;
    let (tag, games) = TagService::<E>::new(state.db.clone()).detail(id).await?;

    views::page(
        "delete_confirm",
        &json!({
            "title": format!("Delete {}", E::KIND_TITLE),
            "kind": E::KIND,
            "name": E::name_of(&tag),
            "dependents": game_links(&games),
            "action": format!("/{}/{}/delete", E::KIND, id),
            "cancel_url": E::url_of(&tag),
        }),
    )
}

pub async fn delete<E: TagEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, InventoryError> {
    let id = parse_id(E::KIND_TITLE, &id)?;
    TagService::<E>::new(state.db.clone()).delete(id).await?;
    Ok(Redirect::to(&format!("/{}", E::KIND_PLURAL)))
}

fn form_payload<E: TagEntity>(
    id: Option<uuid::Uuid>,
    name: &str,
    errors: Option<&crate::validation::ValidationErrors>,
) -> serde_json::Value {
    let (title, action) = match id {
        Some(id) => (
            format!("Update {}", E::KIND_TITLE),
            format!("/{}/{}/update", E::KIND, id),
        ),
        None => (
            format!("Create {}", E::KIND_TITLE),
            format!("/{}/create", E::KIND),
        ),
    };
    json!({
        "title": title,
        "action": action,
        "values": { "name": name },
        "errors": errors.map(|errors| errors.flatten()),
    })
}
