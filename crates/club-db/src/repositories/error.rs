//! Error handling utilities for repositories

use club_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Whether the error is a unique-constraint violation
pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if is_unique_violation(&e) {
        return on_unique();
    }
    map_db_error(e)
}

/// Fail with `not_found` when an UPDATE/DELETE touched no row
pub fn ensure_affected<F>(rows_affected: u64, not_found: F) -> Result<(), DomainError>
where
    F: FnOnce() -> DomainError,
{
    if rows_affected == 0 {
        Err(not_found())
    } else {
        Ok(())
    }
}
