//! Error handling utilities for repositories

use club_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_write_error(e)
}

/// Map the constraint failures a write can hit
///
/// Foreign key failures become `ReferenceViolation` naming the constraint,
/// CHECK failures become `ValidationError`.
pub fn map_write_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        let constraint = db_err.constraint().unwrap_or("unknown").to_string();
        if db_err.is_foreign_key_violation() {
            return DomainError::ReferenceViolation(constraint);
        }
        if db_err.is_check_violation() {
            return DomainError::ValidationError(format!("constraint {constraint} failed"));
        }
    }
    map_db_error(e)
}
