//! Field validation for form submissions.
//!
//! Rules run in a fixed order per field: trim, required/length,
//! type/range/enum, then (in the services) uniqueness against the store.
//! Failures accumulate in [`ValidationErrors`] instead of short-circuiting,
//! so a re-rendered form can show every problem at once. Free-text values
//! are HTML-escaped before they are handed to the store.

use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::InventoryError;

/// Longest accepted `name` for any catalog entity.
pub const NAME_MAX: usize = 100;

/// Inclusive bounds for `time_of_creation`, fixed once when the process
/// starts rather than hardcoded.
#[derive(Copy, Clone, Debug)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn current() -> Self {
        Self {
            min: 1960,
            max: Utc::now().year(),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Validation failures keyed by field name, in submission order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: IndexMap<String, Vec<String>>,
}

/// Flattened failure, the shape the form templates iterate over.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn flatten(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| FieldError {
                    field: field.clone(),
                    message: message.clone(),
                })
            })
            .collect()
    }
}

fn label(field: &str) -> String {
    let mut label = field.replace('_', " ");
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}

/// Required free-text field: trim, length check, escape.
pub fn required_name(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    min: usize,
) -> Option<String> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{} is required", label(field)));
        return None;
    }
    let length = trimmed.chars().count();
    if length < min {
        errors.push(
            field,
            format!("{} must be at least {} characters", label(field), min),
        );
        return None;
    }
    if length > NAME_MAX {
        errors.push(
            field,
            format!("{} must be at most {} characters", label(field), NAME_MAX),
        );
        return None;
    }
    Some(escape_html(trimmed))
}

/// Optional year field; bounds come from the startup clock.
pub fn optional_year(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    bounds: YearBounds,
) -> Option<i32> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i32>() {
        Ok(year) if bounds.contains(year) => Some(year),
        Ok(_) => {
            errors.push(
                field,
                format!(
                    "{} must be between {} and {}",
                    label(field),
                    bounds.min,
                    bounds.max
                ),
            );
            None
        }
        Err(_) => {
            errors.push(field, format!("{} must be a year", label(field)));
            None
        }
    }
}

/// Required enum field.
pub fn member_of(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    allowed: &[&str],
) -> Option<String> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{} is required", label(field)));
        return None;
    }
    if !allowed.contains(&trimmed) {
        errors.push(
            field,
            format!("{} must be one of: {}", label(field), allowed.join(", ")),
        );
        return None;
    }
    Some(trimmed.to_string())
}

/// Optional free text with a fallback; never fails.
pub fn optional_text(raw: Option<&str>, default: &str) -> String {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        escape_html(trimmed)
    }
}

/// Optional single reference: identifier format only, existence of the
/// referenced record is not re-verified.
pub fn optional_reference(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<Uuid> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return None;
    }
    match Uuid::parse_str(trimmed) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(
                field,
                format!("{} is not a valid identifier", label(field)),
            );
            None
        }
    }
}

/// Multi-value reference field, normalized to a deduplicated list whether
/// the client submitted zero, one bare, or many values.
pub fn reference_list(
    errors: &mut ValidationErrors,
    field: &str,
    raws: &[String],
) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for raw in raws {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        match Uuid::parse_str(trimmed) {
            Ok(id) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            Err(_) => errors.push(
                field,
                format!("{} contains an invalid identifier", label(field)),
            ),
        }
    }
    ids
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Route identifiers are opaque; anything that does not parse is an unknown
/// record, never a raw store error.
pub fn parse_id(entity: &'static str, raw: &str) -> Result<Uuid, InventoryError> {
    Uuid::parse_str(raw).map_err(|_| InventoryError::not_found(entity, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_keyed_by_field() {
        let mut errors = ValidationErrors::new();
        assert!(required_name(&mut errors, "name", Some("   "), 1).is_none());
        assert_eq!(errors.field("name"), ["Name is required"]);
    }

    #[test]
    fn name_length_bounds() {
        let mut errors = ValidationErrors::new();
        let long = "x".repeat(101);
        assert!(required_name(&mut errors, "name", Some("ab"), 3).is_none());
        assert!(required_name(&mut errors, "name", Some(long.as_str()), 3).is_none());
        assert_eq!(
            required_name(&mut errors, "name", Some("  Action  "), 3).as_deref(),
            Some("Action")
        );
        assert_eq!(errors.field("name").len(), 2);
    }

    #[test]
    fn free_text_is_escaped() {
        let mut errors = ValidationErrors::new();
        let name = required_name(&mut errors, "name", Some("Ratchet & Clank"), 1);
        assert_eq!(name.as_deref(), Some("Ratchet &amp; Clank"));
        assert!(errors.is_empty());
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let bounds = YearBounds { min: 1960, max: 2026 };
        let mut errors = ValidationErrors::new();
        assert_eq!(
            optional_year(&mut errors, "time_of_creation", Some("1960"), bounds),
            Some(1960)
        );
        assert_eq!(
            optional_year(&mut errors, "time_of_creation", Some("2026"), bounds),
            Some(2026)
        );
        assert!(errors.is_empty());

        assert!(optional_year(&mut errors, "time_of_creation", Some("1959"), bounds).is_none());
        assert!(optional_year(&mut errors, "time_of_creation", Some("2027"), bounds).is_none());
        assert!(optional_year(&mut errors, "time_of_creation", Some("soon"), bounds).is_none());
        assert_eq!(errors.field("time_of_creation").len(), 3);
    }

    #[test]
    fn blank_year_is_accepted_as_absent() {
        let mut errors = ValidationErrors::new();
        assert!(optional_year(&mut errors, "time_of_creation", None, YearBounds::current()).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn enum_membership() {
        let allowed = ["N/A", "Indie", "Studio"];
        let mut errors = ValidationErrors::new();
        assert_eq!(
            member_of(&mut errors, "type", Some("Indie"), &allowed).as_deref(),
            Some("Indie")
        );
        assert!(member_of(&mut errors, "type", Some("Garage"), &allowed).is_none());
        assert!(member_of(&mut errors, "type", None, &allowed).is_none());
        assert_eq!(errors.field("type").len(), 2);
    }

    #[test]
    fn reference_list_normalizes_and_dedupes() {
        let mut errors = ValidationErrors::new();
        let id = Uuid::new_v4();
        let raws = vec![id.to_string(), id.to_string(), "not-an-id".to_string()];
        let ids = reference_list(&mut errors, "genre", &raws);
        assert_eq!(ids, [id]);
        assert_eq!(errors.field("genre").len(), 1);

        let none = reference_list(&mut errors, "platform", &[]);
        assert!(none.is_empty());
        assert!(errors.field("platform").is_empty());
    }

    #[test]
    fn failures_accumulate_across_fields() {
        let mut errors = ValidationErrors::new();
        required_name(&mut errors, "name", None, 1);
        optional_year(
            &mut errors,
            "time_of_creation",
            Some("1700"),
            YearBounds::current(),
        );
        assert_eq!(errors.flatten().len(), 2);
        assert_eq!(errors.flatten()[0].field, "name");
    }

    #[test]
    fn malformed_identifiers_become_not_found() {
        assert!(parse_id("Genre", "definitely-not-a-uuid")
            .unwrap_err()
            .is_not_found());
        let id = Uuid::new_v4();
        assert_eq!(parse_id("Genre", &id.to_string()).unwrap(), id);
    }
}
