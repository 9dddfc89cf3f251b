//! Listing filters and the `WHERE` clauses they produce.
//!
//! Each filter examines its keys in a fixed order so placeholder positions do
//! not depend on how the caller ordered its query string.

use serde::Deserialize;

use crate::sql::{contains_pattern, ClauseResult, WhereBuilder};
use crate::DbError;

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// Recognized filters for `GET /companies`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name_like: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Build `WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3`
    /// (or the subset present).
    ///
    /// # Errors
    /// [`DbError::InvalidArgument`] if `minEmployees` exceeds `maxEmployees`.
    pub fn where_clause(&self) -> Result<ClauseResult, DbError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(DbError::InvalidArgument(format!(
                    "minEmployees ({min}) cannot be greater than maxEmployees ({max})"
                )));
            }
        }

        let mut clause = WhereBuilder::new();
        if let Some(name) = &self.name_like {
            clause.and_param("name ILIKE {}", contains_pattern(name));
        }
        if let Some(min) = self.min_employees {
            clause.and_param("num_employees >= {}", min);
        }
        if let Some(max) = self.max_employees {
            clause.and_param("num_employees <= {}", max);
        }
        Ok(clause.build())
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// Recognized filters for `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the job title.
    pub title_like: Option<String>,
    pub min_salary: Option<i64>,
    /// Only jobs offering equity. `false` is the same as absent.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Build `WHERE title ILIKE $1 AND salary >= $2 AND equity >= 0`
    /// (or the subset present). The equity predicate takes no parameter.
    pub fn where_clause(&self) -> Result<ClauseResult, DbError> {
        let mut clause = WhereBuilder::new();
        if let Some(title) = &self.title_like {
            clause.and_param("title ILIKE {}", contains_pattern(title));
        }
        if let Some(min) = self.min_salary {
            clause.and_param("salary >= {}", min);
        }
        if self.has_equity == Some(true) {
            clause.and_raw("equity >= 0");
        }
        Ok(clause.build())
    }
}
