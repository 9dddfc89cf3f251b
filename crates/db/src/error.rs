//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Caller-fixable input problem (empty update, inconsistent filter bounds).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A returned row did not match the shape of the record it was mapped to.
    #[error("row mapping error: {0}")]
    RowMapping(#[from] serde_json::Error),

    #[error("unsupported column type {type_name} for column '{column}'")]
    UnsupportedColumn { column: String, type_name: String },
}
