use baklay_core::DomainError;
use tracing::error;

/// Every sqlx failure leaves the store as a single `Storage` error.
pub(crate) fn storage(err: sqlx::Error) -> DomainError {
    error!("Database error: {}", err);
    DomainError::Storage(err.to_string())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
