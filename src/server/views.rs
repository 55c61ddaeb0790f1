//! Handlebars rendering for every page.
//!
//! Templates ship inside the binary and are registered once into a
//! process-wide registry.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use include_dir::{include_dir, Dir};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::config;
use crate::errors::InventoryError;

static TEMPLATE_DIR: Dir = include_dir!("templates");

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    for file in TEMPLATE_DIR.files() {
        if file.path().extension().and_then(|e| e.to_str()) != Some("hbs") {
            continue;
        }
        let name = file
            .path()
            .file_stem()
            .and_then(|stem| stem.to_str())
            .expect("template file names are UTF-8");
        let source = file.contents_utf8().expect("templates are UTF-8");
        registry
            .register_template_string(name, source)
            .expect("bundled templates parse");
    }
    registry
});

pub fn page(template: &str, data: &Value) -> Result<Html<String>, InventoryError> {
    Ok(Html(TEMPLATES.render(template, data)?))
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            InventoryError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
        };

        let message = match &self {
            InventoryError::NotFound { .. } => self.to_string(),
            _ => "Something went wrong while handling the request".to_string(),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", self);
        } else {
            warn!("{}", self);
        }

        let detail = config::is_development().then(|| format!("{:?}", self));
        let data = json!({
            "title": title,
            "status": status.as_u16(),
            "message": message,
            "detail": detail,
        });

        match TEMPLATES.render("error", &data) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(render_error) => {
                error!("error view failed to render: {}", render_error);
                (status, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_register() {
        for name in [
            "index",
            "list",
            "tag_detail",
            "company_detail",
            "game_detail",
            "tag_form",
            "company_form",
            "game_form",
            "delete_confirm",
            "error",
        ] {
            assert!(
                TEMPLATES.get_template(name).is_some(),
                "missing template {}",
                name
            );
        }
    }

    #[test]
    fn list_template_renders_items() {
        let html = page(
            "list",
            &json!({
                "title": "List of Genres",
                "kind": "genre",
                "create_url": "/genre/create",
                "items": [{"name": "Action", "url": "/genre/abc"}],
            }),
        )
        .unwrap();
        assert!(html.0.contains("Action"));
        assert!(html.0.contains("/genre/abc"));
    }

    #[test]
    fn error_template_hides_detail_unless_present() {
        let html = page(
            "error",
            &json!({"title": "Not Found", "status": 404, "message": "Genre x not found", "detail": null}),
        )
        .unwrap();
        assert!(html.0.contains("Genre x not found"));
        assert!(!html.0.contains("<pre>"));
    }
}
