//! Service-level error taxonomy.

use std::fmt;

use crate::executor::DbError;

/// Message returned when a product's category reference does not resolve to
/// an active category.
pub const INACTIVE_CATEGORY_MESSAGE: &str = "CategoryId must reference an active category.";

/// Errors surfaced by [`CatalogService`](crate::service::CatalogService).
///
/// Validation and reference failures are caller-fixable and carry every
/// violation at once; `NotFound` is terminal for the request. Nothing is
/// retried or logged here; retry policy belongs to the caller.
#[derive(Debug)]
pub enum CatalogError {
    /// One or more field rules failed; the full ordered violation list.
    Validation(Vec<String>),
    /// The referenced category is missing or inactive.
    CategoryNotActive,
    /// Target entity absent or soft-deleted.
    NotFound,
    /// Storage failure propagated from the repository.
    Store(DbError),
}

impl CatalogError {
    /// Caller-fixable violation messages, suitable for a 400-style
    /// `{"errors": [...]}` body. `None` for not-found and storage failures.
    pub fn error_messages(&self) -> Option<Vec<String>> {
        match self {
            CatalogError::Validation(errors) => Some(errors.clone()),
            CatalogError::CategoryNotActive => Some(vec![INACTIVE_CATEGORY_MESSAGE.to_string()]),
            CatalogError::NotFound | CatalogError::Store(_) => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join(" "))
            }
            CatalogError::CategoryNotActive => {
                write!(f, "{INACTIVE_CATEGORY_MESSAGE}")
            }
            CatalogError::NotFound => {
                write!(f, "Record not found")
            }
            CatalogError::Store(e) => {
                write!(f, "Storage error: {e}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<DbError> for CatalogError {
    fn from(err: DbError) -> Self {
        CatalogError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_all_messages() {
        let err = CatalogError::Validation(vec![
            "Name is required.".to_string(),
            "Price must be greater than 0.".to_string(),
        ]);
        let display = err.to_string();
        assert!(display.contains("Name is required."));
        assert!(display.contains("Price must be greater than 0."));
    }

    #[test]
    fn test_error_messages_for_reference_failure() {
        let err = CatalogError::CategoryNotActive;
        assert_eq!(
            err.error_messages(),
            Some(vec![INACTIVE_CATEGORY_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_not_found_has_no_error_body() {
        assert!(CatalogError::NotFound.error_messages().is_none());
    }
}
