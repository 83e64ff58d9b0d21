//! Translating store outcomes into request outcomes.

use crate::error::{AppError, StoreError};
use crate::query::{Criteria, Record};

/// Re-classify a store failure for resource `R`. Uniqueness becomes `Conflict`,
/// a missing key becomes `NotFound`; everything else stays a store error.
pub fn classify_store_error<R: Record>(key: &str, err: StoreError) -> AppError {
    match err {
        StoreError::UniqueViolation { field } => {
            AppError::Conflict(format!("{} with this {} already exists", R::NAME, field))
        }
        StoreError::NotFound => not_found(key),
        other => AppError::Store(other),
    }
}

pub fn not_found(key: &str) -> AppError {
    AppError::NotFound(format!("{} not found", key))
}

/// An empty list is only an error when the caller asked for something specific.
pub fn require_matches<R: Record>(rows: Vec<R>, criteria: &Criteria) -> Result<Vec<R>, AppError> {
    if rows.is_empty() && !criteria.is_empty() {
        return Err(AppError::NotFound(format!("no {} matches the given filters", R::NAME)));
    }
    Ok(rows)
}
