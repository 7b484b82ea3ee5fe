use sea_orm::{DbErr, SqlErr, TransactionError};

use crate::error::LibraryServiceError;

pub mod accounts;
pub mod catalog;
pub mod lending;

/// Unwrap a transaction error to the `DbErr` that aborted it.
pub(crate) fn tx_db_err(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

/// Map a foreign-key violation to `conflict`; anything else becomes `Internal` with `ctx`.
pub(crate) fn restrict_violation_as(
    err: DbErr,
    conflict: LibraryServiceError,
    ctx: &'static str,
) -> LibraryServiceError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => conflict,
        _ => anyhow::Error::new(err).context(ctx).into(),
    }
}

/// Map a unique-key violation to `conflict`; anything else becomes `Internal` with `ctx`.
pub(crate) fn unique_violation_as(
    err: DbErr,
    conflict: LibraryServiceError,
    ctx: &'static str,
) -> LibraryServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => anyhow::Error::new(err).context(ctx).into(),
    }
}
