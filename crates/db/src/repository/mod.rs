//! Repository functions — one function per database operation.
//!
//! Every function takes a `&dyn Executor` and returns a `Result<T, DbError>`.
//! Statements are assembled from the fragments in [`crate::sql`] and
//! [`crate::filters`]; rows come back under their external field names.

pub mod companies;
pub mod jobs;
