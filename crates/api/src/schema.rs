//! Request validation beyond what deserialization already enforces.
//!
//! Unknown keys and wrong JSON types are rejected by serde
//! (`deny_unknown_fields` on every payload); this adds the value rules.

use db::filters::{CompanyFilter, JobFilter};
use db::models::{CompanyPatch, JobPatch, NewCompany, NewJob};
use rust_decimal::Decimal;

use crate::error::{ApiError, Result};

const MAX_HANDLE_LEN: usize = 25;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject an explicit `null` for a column that cannot hold one; an absent
/// key passes.
fn not_null<'a>(field: &str, value: &'a Option<Option<String>>) -> Result<Option<&'a str>> {
    match value {
        Some(None) => Err(ApiError::BadRequest(format!("{field} must not be null"))),
        Some(Some(v)) => Ok(Some(v.as_str())),
        None => Ok(None),
    }
}

fn non_negative(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(ApiError::BadRequest(format!(
            "{field} must be greater than or equal to 0"
        ))),
        _ => Ok(()),
    }
}

fn fraction(field: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v < Decimal::ZERO || v > Decimal::ONE => Err(ApiError::BadRequest(format!(
            "{field} must be between 0 and 1"
        ))),
        _ => Ok(()),
    }
}

impl Validate for NewCompany {
    fn validate(&self) -> Result<()> {
        non_empty("handle", &self.handle)?;
        if self.handle.chars().count() > MAX_HANDLE_LEN {
            return Err(ApiError::BadRequest(format!(
                "handle must be at most {MAX_HANDLE_LEN} characters"
            )));
        }
        non_empty("name", &self.name)?;
        non_negative("numEmployees", self.num_employees.map(i64::from))
    }
}

impl Validate for CompanyPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = not_null("name", &self.name)? {
            non_empty("name", name)?;
        }
        not_null("description", &self.description)?;
        non_negative("numEmployees", self.num_employees.flatten().map(i64::from))
    }
}

impl Validate for CompanyFilter {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name_like {
            non_empty("nameLike", name)?;
        }
        non_negative("minEmployees", self.min_employees)?;
        non_negative("maxEmployees", self.max_employees)
    }
}

impl Validate for NewJob {
    fn validate(&self) -> Result<()> {
        non_empty("title", &self.title)?;
        non_empty("companyHandle", &self.company_handle)?;
        non_negative("salary", self.salary.map(i64::from))?;
        fraction("equity", self.equity)
    }
}

impl Validate for JobPatch {
    fn validate(&self) -> Result<()> {
        if let Some(title) = not_null("title", &self.title)? {
            non_empty("title", title)?;
        }
        non_negative("salary", self.salary.flatten().map(i64::from))?;
        fraction("equity", self.equity.flatten())
    }
}

impl Validate for JobFilter {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title_like {
            non_empty("titleLike", title)?;
        }
        non_negative("minSalary", self.min_salary)
    }
}
