//! Error types for the catalog.
//!
//! One enum covers the request-level failure modes: validation failures are
//! recovered by re-rendering the originating form, unknown or malformed
//! identifiers become a 404 view, and everything else surfaces as a 500.

use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Malformed or unknown identifier on a detail/update/delete operation.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// One or more field-level failures, keyed by field name. Handled by the
    /// form handlers; never escapes as an HTTP error status.
    #[error("submission failed validation")]
    Validation(ValidationErrors),

    /// The cascade step of a delete failed. The record and its references
    /// may be out of step; this is reported, not repaired.
    #[error("integrity maintenance failed while deleting {entity} {id}")]
    Integrity {
        entity: &'static str,
        id: Uuid,
        #[source]
        source: DbErr,
    },

    #[error("store error: {0}")]
    Store(#[from] DbErr),

    #[error("view rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl InventoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn integrity(entity: &'static str, id: Uuid, source: DbErr) -> Self {
        Self::Integrity { entity, id, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity_and_id() {
        let err = InventoryError::not_found("Genre", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Genre abc not found");
    }

    #[test]
    fn store_errors_convert() {
        let err: InventoryError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, InventoryError::Store(_)));
    }
}
