//! `db` crate — persistence layer for companies and jobs.
//!
//! Provides the SQL fragment builders, the `Executor` seam (implemented for
//! the Postgres pool and for an in-memory mock), typed records, and one
//! repository module per table.

pub mod error;
pub mod executor;
pub mod filters;
pub mod mock;
pub mod models;
pub mod pool;
pub mod repository;
pub mod sql;

pub use error::DbError;
pub use executor::{Executor, Row};
pub use filters::{CompanyFilter, JobFilter};
pub use pool::DbPool;
pub use sql::{build_set_clause, ClauseResult, FieldMap, SqlValue, UpdatePayload};

#[cfg(test)]
mod repository_tests;
